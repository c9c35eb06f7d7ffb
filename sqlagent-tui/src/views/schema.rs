//! Column description of the open table.

use crate::nav::Pane;
use crate::state::App;
use crate::views::pane_block;
use crate::widgets::GridWidget;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};
use sqlagent_core::ColumnInfo;

pub const HEADERS: [&str; 6] = ["Field", "Type", "Null", "Key", "Default", "Extra"];

pub fn column_row(column: &ColumnInfo) -> Vec<String> {
    vec![
        column.field.clone(),
        column.column_type.clone(),
        column.null.clone(),
        column.key.clone(),
        column.default.clone().unwrap_or_else(|| "NULL".to_string()),
        column.extra.clone(),
    ]
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(schema) = app.schema.as_ref() else {
        let hint = match (&app.active_database, &app.active_table) {
            (_, Some(table)) => format!("Loading {}...", table),
            (Some(_), None) => "Select a table and press Enter".to_string(),
            _ => "Select a database and press Enter".to_string(),
        };
        let paragraph = Paragraph::new(hint)
            .style(Style::default().fg(app.theme.text_dim))
            .block(pane_block(app, Pane::Schema, Pane::Schema.title()));
        f.render_widget(paragraph, area);
        return;
    };

    let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<String>> = schema.columns.iter().map(column_row).collect();
    let title = format!("{}: {}.{}", Pane::Schema.title(), schema.database, schema.table);
    let grid = GridWidget {
        headers: &headers,
        rows: &rows,
        selected: (app.focus == Pane::Schema && !rows.is_empty()).then_some(schema.selected),
        block: pane_block(app, Pane::Schema, title),
        header_style: Style::default().fg(app.theme.secondary),
        selected_style: Style::default().bg(app.theme.bg_highlight),
    };
    grid.render(f, area);
}
