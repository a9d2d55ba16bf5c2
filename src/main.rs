//! customer-manager binary entry point.
//!
//! Parses configuration, starts the runtime that carries network requests,
//! puts the terminal in raw mode, runs the customer manager screen and
//! restores the terminal on exit.
//!
use airline_customer_manager::api::CustomerApi;
use airline_customer_manager::app;
use airline_customer_manager::config::Cli;
use airline_customer_manager::error::{Context, Result};
use airline_customer_manager::logging;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> std::io::Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let settings = Cli::parse().into_settings();
    settings.ensure_config_dir();
    logging::init_logging(settings.log_file.as_deref(), settings.verbosity);

    let api = CustomerApi::new(&settings.base_url)
        .with_ctx(|| format!("configure backend {}", settings.base_url))?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("customer-api")
        .enable_all()
        .build()
        .with_ctx(|| "start async runtime".to_string())?;
    let theme = settings.theme();
    let keymap = settings.keymap();

    let mut terminal = init_terminal().with_ctx(|| "init terminal".to_string())?;

    let res = app::run(&mut terminal, api, runtime.handle().clone(), theme, keymap);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();
    runtime.shutdown_background();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
