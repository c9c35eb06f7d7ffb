//! Screen layout and rendering dispatch.
//!
//! ```text
//! +-----------------------------------------------+
//! | header                                        |
//! +-----------+-----------------------------------+
//! | Databases | Schema                            |
//! +-----------+-----------------------------------+
//! | Tables    | Question                          |
//! |           +-----------------------------------+
//! |           | Generated SQL                     |
//! |           +-----------------------------------+
//! |           | Results                           |
//! +-----------+-----------------------------------+
//! | status                                        |
//! +-----------------------------------------------+
//! ```

pub mod catalog;
pub mod query;
pub mod results;
pub mod schema;

use crate::nav::Pane;
use crate::state::App;
use crate::theme::notification_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(layout[1]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Min(5),
        ])
        .split(columns[1]);

    catalog::render_databases(f, app, left[0]);
    catalog::render_tables(f, app, left[1]);
    schema::render(f, app, right[0]);
    query::render_question(f, app, right[1]);
    query::render_sql(f, app, right[2]);
    results::render(f, app, right[3]);

    render_footer(f, app, layout[2]);
}

/// Bordered block titled with the pane name, highlighted when focused.
pub fn pane_block<'a>(app: &App, pane: Pane, title: impl Into<String>) -> Block<'a> {
    let focused = app.focus == pane;
    let title_style = if focused {
        Style::default().fg(app.theme.primary)
    } else {
        Style::default().fg(app.theme.text_dim)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_color(focused)))
        .title(Span::styled(title.into(), title_style))
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let location = match (&app.active_database, &app.active_table) {
        (Some(db), Some(table)) => format!("{} / {}", db, table),
        (Some(db), None) => db.clone(),
        _ => "no database selected".to_string(),
    };
    let title = format!("sqlagent | {} | {}", app.config.api_base_url, location);
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(block, area);
}

pub fn help_text(focus: Pane) -> &'static str {
    match focus {
        Pane::Question => "Enter/Ctrl-G ask • Alt-Enter newline • Esc leave • Tab next pane • Ctrl-C quit",
        Pane::Sql => "Enter/Ctrl-E execute • Tab next pane • i question • q quit",
        _ => "j/k move • Enter open • Tab next pane • i question • Ctrl-G ask • r refresh • q quit",
    }
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, style) = if let Some(busy) = app.busy {
        (busy.label().to_string(), Style::default().fg(app.theme.info))
    } else if let Some(note) = app.last_notification() {
        (
            note.status_line(),
            Style::default().fg(notification_color(note.level, &app.theme)),
        )
    } else {
        ("Ready".to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(help_text(app.focus), Style::default().fg(app.theme.text_dim))),
        )
        .style(style);
    f.render_widget(footer, area);
}
