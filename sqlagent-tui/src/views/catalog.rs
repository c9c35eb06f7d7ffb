//! Database and table lists.

use crate::nav::Pane;
use crate::state::{App, Selection};
use crate::views::pane_block;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, ListState},
    Frame,
};

pub fn render_databases(f: &mut Frame<'_>, app: &App, area: Rect) {
    render_list(f, app, area, Pane::Databases, &app.databases, app.active_database.as_deref());
}

pub fn render_tables(f: &mut Frame<'_>, app: &App, area: Rect) {
    render_list(f, app, area, Pane::Tables, &app.tables, app.active_table.as_deref());
}

fn render_list(
    f: &mut Frame<'_>,
    app: &App,
    area: Rect,
    pane: Pane,
    selection: &Selection,
    active: Option<&str>,
) {
    let items: Vec<ListItem> = selection
        .items
        .iter()
        .map(|name| {
            let marker = if Some(name.as_str()) == active { "● " } else { "  " };
            ListItem::new(format!("{}{}", marker, name))
        })
        .collect();

    let title = format!("{} ({})", pane.title(), selection.items.len());
    let list = List::new(items)
        .block(pane_block(app, pane, title))
        .style(Style::default().fg(app.theme.text))
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .bg(app.theme.bg_highlight)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(selection.selected);
    f.render_stateful_widget(list, area, &mut state);
}
