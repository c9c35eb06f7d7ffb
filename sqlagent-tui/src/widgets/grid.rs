//! Column grid widget for schema and result rows.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Row, Table, TableState},
    Frame,
};

pub const MAX_COLUMN_WIDTH: u16 = 40;

/// Width per column: the longest header or cell, clamped to `1..=max`.
pub fn column_widths<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>], max: u16) -> Vec<u16> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let widest = rows
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.as_ref().chars().count()))
                .max()
                .unwrap_or(0);
            u16::try_from(widest).unwrap_or(u16::MAX).clamp(1, max.max(1))
        })
        .collect()
}

pub struct GridWidget<'a> {
    pub headers: &'a [String],
    pub rows: &'a [Vec<String>],
    pub selected: Option<usize>,
    pub block: Block<'a>,
    pub header_style: Style,
    pub selected_style: Style,
}

impl<'a> GridWidget<'a> {
    pub fn render(self, f: &mut Frame<'_>, area: Rect) {
        let widths: Vec<Constraint> = column_widths(self.headers, self.rows, MAX_COLUMN_WIDTH)
            .into_iter()
            .map(Constraint::Length)
            .collect();

        let header = Row::new(self.headers.iter().map(|h| h.as_str()))
            .style(self.header_style.add_modifier(Modifier::BOLD));
        let rows = self
            .rows
            .iter()
            .map(|row| Row::new(row.iter().map(|cell| cell.replace('\n', " "))));

        let table = Table::new(rows, widths)
            .header(header)
            .block(self.block)
            .column_spacing(2)
            .highlight_style(self.selected_style);

        let mut state = TableState::default();
        state.select(self.selected);
        f.render_stateful_widget(table, area, &mut state);
    }
}
