//! Shared UI components (message banner, status bar, help overlay).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::collections::{BTreeMap, BTreeSet};

use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppState, FormMode, NoticeLevel};

/// Render the top banner: title plus the current message, if any.
pub fn render_banner(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![Span::styled(
        "Airline Customer Management",
        Style::default()
            .fg(app.theme.header_fg)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(notice) = &app.notice {
        let color = match notice.level {
            NoticeLevel::Info => app.theme.success_fg,
            NoticeLevel::Error => app.theme.error_fg,
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.text.clone(), Style::default().fg(color)));
    }
    let p = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}

/// Render the bottom status bar with mode, focus and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.form_mode {
        FormMode::Create => "CREATE",
        FormMode::Edit => "EDIT",
    };
    let msg = format!(
        "mode: {mode}  focus: {}  customers: {}  endpoint: {}  ?: help",
        app.focus.label(),
        app.customers.len(),
        app.endpoint,
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a centered rectangle of at most `width` x `height` within `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

fn action_label(action: KeyAction) -> Option<&'static str> {
    Some(match action {
        KeyAction::Quit => "Quit",
        KeyAction::NextPane => "Next panel",
        KeyAction::PrevPane => "Previous panel",
        KeyAction::Submit => "Submit / fetch / edit row",
        KeyAction::Cancel => "Cancel edit / clear",
        KeyAction::MoveUp => "Move up",
        KeyAction::MoveDown => "Move down",
        KeyAction::EditSelection => "Edit row",
        KeyAction::DeleteSelection => "Delete row",
        KeyAction::Refresh => "Refresh list",
        KeyAction::ToggleHelp => "Toggle help",
        KeyAction::Ignore => return None,
    })
}

/// Group bindings by their display label.
pub fn help_entries(keymap: &Keymap) -> BTreeMap<&'static str, BTreeSet<String>> {
    let mut entries: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    for ((mods, code), action) in keymap.all_bindings() {
        let Some(label) = action_label(action) else {
            continue;
        };
        let key = match code {
            crossterm::event::KeyCode::BackTab => "Shift+Tab".to_string(),
            _ => Keymap::format_key(mods, code),
        };
        entries.entry(label).or_default().insert(key);
    }
    entries
}

const HELP_NOTES: [&str; 2] = [
    "  In the form and lookup, plain characters are typed, not bound.",
    "  Tab, Shift+Tab, Enter, Esc and Ctrl keys work in every panel.",
];

/// Render the help overlay listing the active key bindings.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let entries = help_entries(&app.keymap);
    let label_w = entries.keys().map(|k| k.len()).max().unwrap_or(0);

    let mut lines: Vec<Line> = Vec::new();
    for (label, keys) in &entries {
        let joined = keys.iter().cloned().collect::<Vec<_>>().join(", ");
        lines.push(Line::from(vec![
            Span::raw(format!("  {:>width$} │ ", label, width = label_w)),
            Span::styled(joined, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }
    lines.push(Line::raw(""));
    for note in HELP_NOTES {
        lines.push(Line::from(Span::styled(
            note,
            Style::default().fg(app.theme.muted),
        )));
    }

    let height = (lines.len() as u16).saturating_add(2);
    let rect = centered_rect(72, height, area);
    let p = Paragraph::new(lines)
        .style(Style::default().fg(app.theme.text))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Keybindings")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
