use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, Focus, FormMode};
use crate::customer::FormField;
use crate::ui::pane_block;

/// Width of the label column, wide enough for "Passport Number".
const LABEL_WIDTH: usize = 16;

pub fn render_form(f: &mut Frame, area: Rect, app: &AppState) {
    let title = match app.form_mode {
        FormMode::Create => "Add Customer",
        FormMode::Edit => "Edit Customer",
    };
    let focused = app.focus == Focus::Form;

    let lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| {
            let current = focused && field == app.form_field;
            let marker = if current { "▶ " } else { "  " };
            let label = format!("{marker}{:<width$}", field.label(), width = LABEL_WIDTH);
            let value = app.form.get(field);
            let value_span = if value.is_empty() {
                Span::styled(field.label(), Style::default().fg(app.theme.muted))
            } else {
                Span::styled(value.to_string(), Style::default().fg(app.theme.text))
            };
            let label_style = if current {
                Style::default()
                    .fg(app.theme.highlight_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.title)
            };
            let mut spans = vec![Span::styled(label, label_style), value_span];
            if current {
                spans.push(Span::styled("_", Style::default().fg(app.theme.highlight_fg)));
            }
            Line::from(spans)
        })
        .collect();

    let p = Paragraph::new(lines).block(pane_block(title, Focus::Form, app));
    f.render_widget(p, area);
}

pub fn render_lookup_input(f: &mut Frame, area: Rect, app: &AppState) {
    let line = if app.lookup_input.is_empty() && app.focus != Focus::Lookup {
        Line::from(Span::styled("Enter ID", Style::default().fg(app.theme.muted)))
    } else {
        let mut spans = vec![Span::styled(
            app.lookup_input.clone(),
            Style::default().fg(app.theme.text),
        )];
        if app.focus == Focus::Lookup {
            spans.push(Span::styled("_", Style::default().fg(app.theme.highlight_fg)));
        }
        Line::from(spans)
    };
    let p = Paragraph::new(line).block(pane_block("Get Customer By ID", Focus::Lookup, app));
    f.render_widget(p, area);
}
