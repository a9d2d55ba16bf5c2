//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Bindings only decide what non-text keys do. While the form or lookup
//! panel has focus, plain characters are typed into the input instead of
//! being resolved here.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::path::Path;

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Move focus to the next panel.
    NextPane,
    /// Move focus to the previous panel.
    PrevPane,
    /// Submit the form, run the lookup, or edit the selected row.
    Submit,
    /// Cancel an edit or clear the lookup input.
    Cancel,
    MoveUp,
    MoveDown,
    /// Load the selected row into the form.
    EditSelection,
    /// Delete the selected row on the backend.
    DeleteSelection,
    /// Re-fetch the customer list.
    Refresh,
    ToggleHelp,
    /// Ignore this key.
    Ignore,
}

/// Mapping from `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Create a keymap with default keybindings.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Tab), KeyAction::NextPane);
        // Shift+Tab is BackTab in crossterm; some terminals also report SHIFT
        bindings.insert((M::NONE, BackTab), KeyAction::PrevPane);
        bindings.insert((M::SHIFT, BackTab), KeyAction::PrevPane);
        bindings.insert((M::NONE, Enter), KeyAction::Submit);
        bindings.insert((M::NONE, Esc), KeyAction::Cancel);
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('r')), KeyAction::Refresh);
        bindings.insert((M::CONTROL, Char('r')), KeyAction::Refresh);
        bindings.insert((M::NONE, Char('?')), KeyAction::ToggleHelp);
        Self { bindings }
    }

    /// Load a keymap from `path`, or write the defaults there if it doesn't exist.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::debug!(path = %path.display(), error = %e, "could not write default keybinds");
        }
        km
    }

    /// Load a keymap from a file of `<Action> = <KeySpec>` lines, on top of the defaults.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::from_config_str(&contents))
    }

    fn from_config_str(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
            }
        }
        map
    }

    /// Write the default-visible subset of bindings to a configuration file.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# airline-customer-manager keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Shift+BackTab, Enter, Esc, Tab, BackTab, Up, Down, Delete, ?\n");
        buf.push_str("# Actions: Quit, NextPane, PrevPane, Submit, Cancel, MoveUp, MoveDown, EditSelection, DeleteSelection, Refresh, ToggleHelp, Ignore\n\n");

        let mut entries: Vec<(String, KeyAction)> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| (Self::format_key(*mods, *code), *action))
            .collect();
        entries.sort_by(|a, b| format_action(a.1).cmp(format_action(b.1)).then(a.0.cmp(&b.0)));
        for (k, a) in entries {
            let _ = writeln!(&mut buf, "{} = {}", format_action(a), k);
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its bound action.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Snapshot of all bindings as ((modifiers, code), action) pairs.
    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Format a key into a spec like "Ctrl+c" or "BackTab".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        let mut spec = String::new();
        if mods.contains(KeyModifiers::CONTROL) {
            spec.push_str("Ctrl+");
        }
        if mods.contains(KeyModifiers::SHIFT) {
            spec.push_str("Shift+");
        }
        spec.push_str(&base);
        spec
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let mut rest = spec.trim();
    let mut mods = KeyModifiers::NONE;
    loop {
        if let Some(after) = rest.strip_prefix("Ctrl+") {
            mods |= KeyModifiers::CONTROL;
            rest = after;
        } else if let Some(after) = rest.strip_prefix("Shift+") {
            mods |= KeyModifiers::SHIFT;
            rest = after;
        } else {
            break;
        }
    }
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    match s.trim() {
        "Quit" => Some(KeyAction::Quit),
        "NextPane" => Some(KeyAction::NextPane),
        "PrevPane" => Some(KeyAction::PrevPane),
        "Submit" => Some(KeyAction::Submit),
        "Cancel" => Some(KeyAction::Cancel),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "EditSelection" => Some(KeyAction::EditSelection),
        "DeleteSelection" => Some(KeyAction::DeleteSelection),
        "Refresh" => Some(KeyAction::Refresh),
        "ToggleHelp" => Some(KeyAction::ToggleHelp),
        "Ignore" => Some(KeyAction::Ignore),
        _ => None,
    }
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::NextPane => "NextPane",
        KeyAction::PrevPane => "PrevPane",
        KeyAction::Submit => "Submit",
        KeyAction::Cancel => "Cancel",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::EditSelection => "EditSelection",
        KeyAction::DeleteSelection => "DeleteSelection",
        KeyAction::Refresh => "Refresh",
        KeyAction::ToggleHelp => "ToggleHelp",
        KeyAction::Ignore => "Ignore",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(mods: KeyModifiers, code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn defaults_resolve() {
        let km = Keymap::default();
        assert_eq!(
            km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('c'))),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            km.resolve(&key(KeyModifiers::NONE, KeyCode::Delete)),
            Some(KeyAction::DeleteSelection)
        );
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('z'))), None);
    }

    #[test]
    fn config_overrides_defaults() {
        let km = Keymap::from_config_str(
            "# comment\nRefresh = F\nQuit = Ctrl+x\nbogus line\nNotAnAction = y\n",
        );
        assert_eq!(
            km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('F'))),
            Some(KeyAction::Refresh)
        );
        assert_eq!(
            km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('x'))),
            Some(KeyAction::Quit)
        );
        // defaults still present
        assert_eq!(
            km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('q'))),
            Some(KeyAction::Quit)
        );
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('y'))), None);
    }

    #[test]
    fn parse_key_specs() {
        assert_eq!(parse_key("Esc"), Some((KeyModifiers::NONE, KeyCode::Esc)));
        assert_eq!(
            parse_key(" Ctrl+r "),
            Some((KeyModifiers::CONTROL, KeyCode::Char('r')))
        );
        assert_eq!(parse_key("abc"), None);
    }

    #[test]
    fn written_file_has_one_line_per_binding() {
        let km = Keymap::default();
        let path = std::env::temp_dir().join(format!(
            "acm_keys_{}_{:?}.conf",
            std::process::id(),
            std::thread::current().id()
        ));
        km.write_file(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let lines: Vec<&str> = contents
            .lines()
            .filter(|l| !l.trim().is_empty() && !l.starts_with('#'))
            .collect();
        let unique: std::collections::HashSet<&str> = lines.iter().copied().collect();
        assert_eq!(lines.len(), km.all_bindings().len());
        assert_eq!(unique.len(), lines.len());
        assert!(lines.contains(&"PrevPane = Shift+BackTab"));
        assert!(lines.contains(&"PrevPane = BackTab"));

        let reloaded = Keymap::from_config_str(&contents);
        assert_eq!(
            reloaded.resolve(&key(KeyModifiers::SHIFT, KeyCode::BackTab)),
            Some(KeyAction::PrevPane)
        );
    }

    #[test]
    fn format_key_round_trips_through_parse() {
        for ((mods, code), _) in Keymap::default().all_bindings() {
            let spec = Keymap::format_key(mods, code);
            assert_eq!(parse_key(&spec), Some((mods, code)), "spec {spec}");
        }
    }
}
