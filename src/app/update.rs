use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::info;

use crate::api::CustomerApi;
use crate::app::keymap::{KeyAction, Keymap};
use crate::app::sync::Command;
use crate::app::worker::Dispatcher;
use crate::app::{AppState, Focus, Theme};
use crate::customer::accepts_numeric;
use crate::ui;

/// Run the customer manager until the user quits.
///
/// Network work is spawned on `handle`; this loop only draws, reads keys and
/// folds completions into state.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    api: CustomerApi,
    handle: Handle,
    theme: Theme,
    keymap: Keymap,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = AppState::new(api.endpoint(), theme, keymap);
    let mut dispatcher = Dispatcher::new(api, handle, tx);
    info!(endpoint = %app.endpoint, "customer manager started");

    dispatcher.dispatch_all(app.mount());

    loop {
        while let Ok(done) = rx.try_recv() {
            let follow_up = app.apply(done);
            dispatcher.dispatch_all(follow_up);
        }

        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let cmds = handle_key(&mut app, key);
                    dispatcher.dispatch_all(cmds);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("customer manager stopped");
    Ok(())
}

/// Apply one key press to `app` and return the network commands it triggers.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<Command> {
    let action = app.keymap.resolve(&key);

    if app.show_help {
        match action {
            Some(KeyAction::Quit) => app.should_quit = true,
            Some(KeyAction::ToggleHelp | KeyAction::Cancel | KeyAction::Submit) => {
                app.show_help = false;
            }
            _ => {}
        }
        return Vec::new();
    }

    if app.focus != Focus::Table && edit_input(app, &key) {
        return Vec::new();
    }

    let mut cmds = Vec::new();
    match action {
        Some(KeyAction::Quit) => app.should_quit = true,
        Some(KeyAction::NextPane) => app.focus = app.focus.next(),
        Some(KeyAction::PrevPane) => app.focus = app.focus.prev(),
        Some(KeyAction::Submit) => match app.focus {
            Focus::Form => cmds.push(app.submit_form()),
            Focus::Lookup => cmds.push(app.lookup()),
            Focus::Table => edit_selected(app),
        },
        Some(KeyAction::Cancel) => match app.focus {
            Focus::Form => app.cancel_edit(),
            Focus::Lookup => app.lookup_input.clear(),
            Focus::Table => {}
        },
        Some(KeyAction::MoveUp) => match app.focus {
            Focus::Form => app.form_field = app.form_field.prev(),
            Focus::Table => app.selected_index = app.selected_index.saturating_sub(1),
            Focus::Lookup => {}
        },
        Some(KeyAction::MoveDown) => match app.focus {
            Focus::Form => app.form_field = app.form_field.next(),
            Focus::Table => {
                if app.selected_index + 1 < app.customers.len() {
                    app.selected_index += 1;
                }
            }
            Focus::Lookup => {}
        },
        Some(KeyAction::EditSelection) => {
            if app.focus == Focus::Table {
                edit_selected(app);
            }
        }
        Some(KeyAction::DeleteSelection) => {
            if app.focus == Focus::Table {
                cmds.extend(app.delete_selected());
            }
        }
        Some(KeyAction::Refresh) => cmds.push(Command::FetchAll),
        Some(KeyAction::ToggleHelp) => app.show_help = true,
        Some(KeyAction::Ignore) | None => {}
    }
    cmds
}

fn edit_selected(app: &mut AppState) {
    if app.begin_edit(app.selected_index) {
        app.focus = Focus::Form;
    }
}

/// Typing into the focused text input. Returns true when the key was consumed.
fn edit_input(app: &mut AppState, key: &KeyEvent) -> bool {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return false;
    }
    match (app.focus, key.code) {
        (Focus::Form, KeyCode::Char(c)) => {
            app.form.push_char(app.form_field, c);
            true
        }
        (Focus::Form, KeyCode::Backspace) => {
            app.form.pop_char(app.form_field);
            true
        }
        (Focus::Lookup, KeyCode::Char(c)) => {
            if accepts_numeric(&app.lookup_input, c) {
                app.lookup_input.push(c);
            }
            true
        }
        (Focus::Lookup, KeyCode::Backspace) => {
            app.lookup_input.pop();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FormMode;
    use crate::customer::{Customer, FormField};

    fn app() -> AppState {
        AppState::new("http://test/customerapi", Theme::dark(), Keymap::default())
    }

    fn press(app: &mut AppState, code: KeyCode) -> Vec<Command> {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn seeded() -> AppState {
        let mut app = app();
        app.customers = vec![
            Customer {
                id: Some(1),
                name: "A".into(),
                ..Default::default()
            },
            Customer {
                id: Some(2),
                name: "B".into(),
                ..Default::default()
            },
        ];
        app
    }

    #[test]
    fn typing_in_form_fills_fields_including_letters_bound_elsewhere() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.form_field, FormField::Name);
        type_str(&mut app, "qed");
        assert_eq!(app.form.name, "qed");
        assert!(!app.should_quit);
    }

    #[test]
    fn enter_in_form_creates() {
        let mut app = app();
        type_str(&mut app, "7");
        let cmds = press(&mut app, KeyCode::Enter);
        assert!(matches!(cmds.as_slice(), [Command::Create(_)]));
    }

    #[test]
    fn table_edit_then_submit_updates() {
        let mut app = seeded();
        app.focus = Focus::Table;
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.focus, Focus::Form);
        assert_eq!(app.form_mode, FormMode::Edit);
        assert_eq!(app.form.id, "2");
        let cmds = press(&mut app, KeyCode::Enter);
        match cmds.as_slice() {
            [Command::Update(body)] => assert_eq!(body["id"], serde_json::json!(2)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn esc_in_form_cancels_edit_without_commands() {
        let mut app = seeded();
        app.focus = Focus::Table;
        press(&mut app, KeyCode::Enter);
        let cmds = press(&mut app, KeyCode::Esc);
        assert!(cmds.is_empty());
        assert_eq!(app.form_mode, FormMode::Create);
        assert!(app.form.is_empty());
    }

    #[test]
    fn delete_key_in_table_deletes_selected() {
        let mut app = seeded();
        app.focus = Focus::Table;
        let cmds = press(&mut app, KeyCode::Delete);
        assert_eq!(cmds, vec![Command::Delete(1)]);
    }

    #[test]
    fn lookup_accepts_digits_only() {
        let mut app = app();
        app.focus = Focus::Lookup;
        type_str(&mut app, "4x2");
        assert_eq!(app.lookup_input, "42");
        let cmds = press(&mut app, KeyCode::Enter);
        assert_eq!(cmds, vec![Command::Get("42".into())]);
        press(&mut app, KeyCode::Esc);
        assert!(app.lookup_input.is_empty());
    }

    #[test]
    fn tab_cycles_focus_and_q_quits_from_table() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Lookup);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Table);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_from_form() {
        let mut app = app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
        assert!(app.form.is_empty());
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = seeded();
        app.focus = Focus::Table;
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        assert!(press(&mut app, KeyCode::Char('d')).is_empty());
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn refresh_fetches_from_table() {
        let mut app = app();
        app.focus = Focus::Table;
        assert_eq!(press(&mut app, KeyCode::Char('r')), vec![Command::FetchAll]);
    }
}
