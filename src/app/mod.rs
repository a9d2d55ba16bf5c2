//! Application state types and entry glue.
//!
//! Defines the state owned by the customer manager screen, the theme, and
//! re-exports the event loop (`run`).
//!
pub mod keymap;
pub mod sync;
pub mod update;
pub mod worker;

use ratatui::style::Color;
use std::path::Path;

use crate::customer::{Customer, CustomerForm, FormField};
use keymap::Keymap;
use sync::RequestId;

/// Which panel receives key input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    Form,
    Lookup,
    Table,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Form => Focus::Lookup,
            Focus::Lookup => Focus::Table,
            Focus::Table => Focus::Form,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Form => Focus::Table,
            Focus::Lookup => Focus::Form,
            Focus::Table => Focus::Lookup,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Form => "form",
            Focus::Lookup => "lookup",
            Focus::Table => "table",
        }
    }
}

/// Whether submitting the form creates a new customer or updates the loaded one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// The single message slot. Every operation overwrites it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub focus_border: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub success_fg: Color,
    pub error_fg: Color,
}

impl Theme {
    /// Dark default theme.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            focus_border: Color::Yellow,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            success_fg: Color::Green,
            error_fg: Color::Red,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            focus_border: Color::Rgb(0x89, 0xb4, 0xfa), // blue
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            success_fg: Color::Rgb(0xa6, 0xe3, 0xa1),   // green
            error_fg: Color::Rgb(0xf3, 0x8b, 0xa8),     // red
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let Some(color) = Self::parse_color(val) else {
                continue;
            };
            match key.trim() {
                "text" => theme.text = color,
                "muted" => theme.muted = color,
                "title" => theme.title = color,
                "border" => theme.border = color,
                "focus_border" => theme.focus_border = color,
                "header_fg" => theme.header_fg = color,
                "status_bg" => theme.status_bg = color,
                "status_fg" => theme.status_fg = color,
                "highlight_fg" => theme.highlight_fg = color,
                "highlight_bg" => theme.highlight_bg = color,
                "success_fg" => theme.success_fg = color,
                "error_fg" => theme.error_fg = color,
                _ => {}
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# airline-customer-manager theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // Named colors get a best-effort hex approximation
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                _ => "reset".to_string(),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("border", self.border);
        kv("focus_border", self.focus_border);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("success_fg", self.success_fg);
        kv("error_fg", self.error_fg);

        std::fs::write(path, buf)
    }

    /// Load the theme at `path`, writing the default there first if it does not exist.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::debug!(path = %path.display(), error = %e, "could not write default theme");
        }
        t
    }
}

/// Everything the customer manager screen owns.
pub struct AppState {
    /// Last successful `/all` response.
    pub customers: Vec<Customer>,
    pub form: CustomerForm,
    pub form_mode: FormMode,
    pub form_field: FormField,
    pub lookup_input: String,
    pub fetched: Option<Customer>,
    pub notice: Option<Notice>,
    pub focus: Focus,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub show_help: bool,
    pub should_quit: bool,
    /// Shown in the status bar.
    pub endpoint: String,
    pub theme: Theme,
    pub keymap: Keymap,
    pub last_list_request: Option<RequestId>,
}

impl AppState {
    pub fn new(endpoint: impl Into<String>, theme: Theme, keymap: Keymap) -> Self {
        Self {
            customers: Vec::new(),
            form: CustomerForm::default(),
            form_mode: FormMode::Create,
            form_field: FormField::Id,
            lookup_input: String::new(),
            fetched: None,
            notice: None,
            focus: Focus::Form,
            selected_index: 0,
            rows_per_page: 10,
            show_help: false,
            should_quit: false,
            endpoint: endpoint.into(),
            theme,
            keymap,
            last_list_request: None,
        }
    }

    pub fn selected_customer(&self) -> Option<&Customer> {
        self.customers.get(self.selected_index)
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
