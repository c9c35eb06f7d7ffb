//! Question editor and generated SQL.

use crate::nav::Pane;
use crate::state::App;
use crate::views::pane_block;
use crate::widgets::SqlHighlighter;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render_question(f: &mut Frame<'_>, app: &App, area: Rect) {
    let mut editor = app.question.clone();
    editor.set_block(pane_block(app, Pane::Question, Pane::Question.title()));
    let cursor = if app.focus == Pane::Question {
        Style::default().bg(app.theme.primary)
    } else {
        Style::default()
    };
    editor.set_cursor_style(cursor);
    f.render_widget(editor.widget(), area);
}

pub fn highlighter(app: &App) -> SqlHighlighter {
    SqlHighlighter {
        keyword_color: app.theme.primary,
        function_color: app.theme.secondary,
        string_color: Color::Rgb(255, 165, 0),
        number_color: app.theme.success,
        comment_color: app.theme.text_dim,
    }
}

pub fn render_sql(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = pane_block(app, Pane::Sql, Pane::Sql.title());
    let paragraph = if app.sql.trim().is_empty() {
        Paragraph::new("Press Ctrl-G in the question pane to generate SQL")
            .style(Style::default().fg(app.theme.text_dim))
    } else {
        Paragraph::new(highlighter(app).highlight(&app.sql))
    };
    f.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}
