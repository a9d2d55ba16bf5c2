pub mod components;
pub mod form;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::app::{AppState, Focus};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8), Constraint::Length(1)])
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(root[1]);
    // 7 fields + borders, lookup input, lookup result
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Length(3), Constraint::Min(4)])
        .split(body[0]);

    components::render_banner(f, root[0], app);
    form::render_form(f, left[0], app);
    form::render_lookup_input(f, left[1], app);
    table::render_fetched_customer(f, left[2], app);
    table::render_customers_table(f, body[1], app);
    components::render_status_bar(f, root[2], app);

    if app.show_help {
        components::render_help_modal(f, f.area(), app);
    }
}

/// Bordered block whose border lights up when `pane` has focus.
pub(crate) fn pane_block<'a>(title: &'a str, pane: Focus, app: &AppState) -> Block<'a> {
    let color = if app.focus == pane {
        app.theme.focus_border
    } else {
        app.theme.border
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}
