//! Tracing setup.
//!
//! The terminal belongs to the UI, so logs go to a file. `RUST_LOG`
//! overrides the level chosen with `-v`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a level.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber writing to `path`.
///
/// Returns false when there is no path, the file can't be opened, or a
/// subscriber is already installed; the app then runs without logs.
pub fn init_logging(path: Option<&Path>, verbosity: u8) -> bool {
    let Some(path) = path else {
        return false;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };

    let default_filter = format!(
        "{}={}",
        env!("CARGO_CRATE_NAME"),
        level_for(verbosity)
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), Level::INFO);
        assert_eq!(level_for(1), Level::DEBUG);
        assert_eq!(level_for(7), Level::TRACE);
    }

    #[test]
    fn no_path_disables_logging() {
        assert!(!init_logging(None, 0));
    }
}
