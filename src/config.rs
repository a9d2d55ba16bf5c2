//! Command-line and environment configuration.
//!
//! The only setting that changes behavior is the backend base URL. The rest
//! decides where the theme, key bindings and log file live.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::app::Theme;
use crate::app::keymap::Keymap;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const APP_DIR: &str = "airline-customer-manager";
const THEME_FILE: &str = "theme.conf";
const KEYBINDS_FILE: &str = "keybinds.conf";
const LOG_FILE: &str = "customer-manager.log";

/// Manage airline customer records through the customerapi REST backend.
#[derive(Parser, Debug, Clone)]
#[command(name = "customer-manager", version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL; `/customerapi` is appended
    #[arg(long, env = "CUSTOMER_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory holding theme.conf and keybinds.conf
    #[arg(long, env = "CUSTOMER_MANAGER_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Where to write logs (defaults to the config directory)
    #[arg(long, env = "CUSTOMER_MANAGER_LOG")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub config_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub verbosity: u8,
}

impl Cli {
    pub fn into_settings(self) -> Settings {
        let config_dir = self
            .config_dir
            .or_else(|| dirs::config_dir().map(|d| d.join(APP_DIR)));
        let log_file = self
            .log_file
            .or_else(|| config_dir.as_ref().map(|d| d.join(LOG_FILE)));
        Settings {
            base_url: self.base_url,
            config_dir,
            log_file,
            verbosity: self.verbose,
        }
    }
}

impl Settings {
    /// Create the config directory if one is configured. Failure leaves the defaults in use.
    pub fn ensure_config_dir(&self) {
        if let Some(dir) = &self.config_dir {
            let _ = std::fs::create_dir_all(dir);
        }
    }

    pub fn theme(&self) -> Theme {
        match &self.config_dir {
            Some(dir) => Theme::load_or_init(&dir.join(THEME_FILE)),
            None => Theme::mocha(),
        }
    }

    pub fn keymap(&self) -> Keymap {
        match &self.config_dir {
            Some(dir) => Keymap::load_or_init(&dir.join(KEYBINDS_FILE)),
            None => Keymap::default(),
        }
    }
}
