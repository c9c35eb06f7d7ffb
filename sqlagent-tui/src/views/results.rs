//! Result grid of the last executed statement.

use crate::nav::Pane;
use crate::state::App;
use crate::views::pane_block;
use crate::widgets::GridWidget;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(results) = app.results.as_ref() else {
        let paragraph = Paragraph::new("No results yet")
            .style(Style::default().fg(app.theme.text_dim))
            .block(pane_block(app, Pane::Results, Pane::Results.title()));
        f.render_widget(paragraph, area);
        return;
    };

    let title = format!("{} ({} rows)", Pane::Results.title(), results.row_count);
    if results.columns.is_empty() {
        let paragraph = Paragraph::new("Statement returned no columns")
            .style(Style::default().fg(app.theme.text_dim))
            .block(pane_block(app, Pane::Results, title));
        f.render_widget(paragraph, area);
        return;
    }

    let grid = GridWidget {
        headers: &results.columns,
        rows: &results.rows,
        selected: (!results.rows.is_empty()).then_some(results.selected),
        block: pane_block(app, Pane::Results, title),
        header_style: Style::default().fg(app.theme.secondary),
        selected_style: Style::default().bg(app.theme.bg_highlight),
    };
    grid.render(f, area);
}
