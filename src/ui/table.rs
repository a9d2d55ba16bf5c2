use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use crate::app::{AppState, Focus};
use crate::customer::Customer;
use crate::ui::pane_block;

/// Column headers of the customers table, matching the wire names.
pub const COLUMNS: [&str; 7] = [
    "id",
    "name",
    "age",
    "gender",
    "passportNumber",
    "status",
    "flightBooked",
];

/// One table row per customer, in column order.
pub fn customer_row_cells(c: &Customer) -> Vec<String> {
    c.entries().into_iter().map(|(_, v)| v).collect()
}

pub fn render_customers_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = pane_block("All Customers", Focus::Table, app);

    if app.customers.is_empty() {
        let p = Paragraph::new("No customers found.")
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let start = (app.selected_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(app.customers.len());
    let slice = &app.customers[start..end];

    let rows = slice.iter().enumerate().map(|(i, c)| {
        let absolute_index = start + i;
        let style = if absolute_index == app.selected_index {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(customer_row_cells(c).into_iter().map(Cell::from)).style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(22),
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Percentage(20),
        Constraint::Percentage(14),
        // wide enough for the header
        Constraint::Min(12),
    ];

    let header = Row::new(COLUMNS).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_fetched_customer(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(customer) = app.fetched.as_ref() else {
        let p = Paragraph::new("").block(pane_block("Customer Found", Focus::Lookup, app));
        f.render_widget(p, area);
        return;
    };

    let rows = customer.entries().into_iter().map(|(key, value)| {
        Row::new(vec![
            Cell::from(key).style(Style::default().fg(app.theme.title)),
            Cell::from(value).style(Style::default().fg(app.theme.text)),
        ])
    });
    let widths = [Constraint::Length(16), Constraint::Percentage(100)];
    let table = Table::new(rows, widths)
        .block(pane_block("Customer Found", Focus::Lookup, app))
        .column_spacing(1);
    f.render_widget(table, area);
}
