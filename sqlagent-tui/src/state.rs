//! Application state.
//!
//! Key handling and API outcomes are applied here without touching the
//! terminal or the network; both return the next [`Command`] to run, if any.

use crate::config::TuiConfig;
use crate::events::{Command, Outcome};
use crate::keys::Action;
use crate::nav::Pane;
use crate::notifications::{Notification, NotificationLevel};
use crate::persistence::PersistedState;
use crate::theme::Theme;
use ratatui::style::Style;
use serde_json::Value as JsonValue;
use sqlagent_api::types::ExecuteSqlResponse;
use sqlagent_core::ColumnInfo;
use tui_textarea::TextArea;

const MAX_NOTIFICATIONS: usize = 50;

/// A list with a wrapping cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub items: Vec<String>,
    pub selected: Option<usize>,
}

impl Selection {
    pub fn replace(&mut self, items: Vec<String>) {
        self.selected = if items.is_empty() { None } else { Some(0) };
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.selected
            .and_then(|idx| self.items.get(idx))
            .map(String::as_str)
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(idx) => (idx + 1) % self.items.len(),
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => self.items.len() - 1,
            Some(idx) => idx - 1,
        });
    }

    /// Move the cursor onto `name`; false when it is not listed.
    pub fn select_named(&mut self, name: &str) -> bool {
        match self.items.iter().position(|item| item == name) {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub database: String,
    pub table: String,
    pub columns: Vec<ColumnInfo>,
    pub schema_str: String,
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub sql: String,
    pub columns: Vec<String>,
    /// Display text per cell, in column order.
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
    pub selected: usize,
}

impl ResultsView {
    pub fn new(sql: String, response: ExecuteSqlResponse) -> Self {
        let rows = response
            .rows
            .iter()
            .map(|row| {
                response
                    .columns
                    .iter()
                    .map(|column| row.get(column).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();
        Self {
            sql,
            columns: response.columns,
            rows,
            row_count: response.row_count,
            selected: 0,
        }
    }
}

/// Text shown for one result cell.
pub fn cell_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "NULL".to_string(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Busy {
    Generating,
    Executing,
}

impl Busy {
    pub fn label(&self) -> &'static str {
        match self {
            Busy::Generating => "Generating SQL...",
            Busy::Executing => "Executing SQL...",
        }
    }
}

#[derive(Debug, Clone)]
pub struct App {
    pub config: TuiConfig,
    pub theme: Theme,
    pub focus: Pane,

    pub databases: Selection,
    pub tables: Selection,
    pub active_database: Option<String>,
    pub active_table: Option<String>,
    pub schema: Option<TableSchema>,

    pub question: TextArea<'static>,
    pub sql: String,
    pub results: Option<ResultsView>,

    pub notifications: Vec<Notification>,
    pub busy: Option<Busy>,
    pub should_quit: bool,

    /// Execute the next generated statement.
    execute_after_generate: bool,
    restore: PersistedState,
}

impl App {
    pub fn new(config: TuiConfig, restore: PersistedState) -> Self {
        let theme = Theme::from_name(&config.theme.name).unwrap_or_else(Theme::synthbrute);
        let mut question = TextArea::default();
        question.set_placeholder_text("Ask a question about the selected table");
        question.set_cursor_line_style(Style::default());
        Self {
            config,
            theme,
            focus: Pane::Databases,
            databases: Selection::default(),
            tables: Selection::default(),
            active_database: None,
            active_table: None,
            schema: None,
            question,
            sql: String::new(),
            results: None,
            notifications: Vec::new(),
            busy: None,
            should_quit: false,
            execute_after_generate: false,
            restore,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let excess = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    pub fn question_text(&self) -> String {
        self.question.lines().join("\n")
    }

    /// Selection to write back to disk on exit.
    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            database: self.active_database.clone(),
            table: self.active_table.clone(),
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::NextPane => {
                self.focus = self.focus.next();
                None
            }
            Action::PrevPane => {
                self.focus = self.focus.previous();
                None
            }
            Action::MoveUp => {
                self.move_cursor(false);
                None
            }
            Action::MoveDown => {
                self.move_cursor(true);
                None
            }
            Action::Confirm => self.confirm(),
            Action::Ask => self.ask(),
            Action::Execute => self.execute_current(),
            Action::Refresh => self.refresh(),
            Action::FocusQuestion => {
                self.focus = Pane::Question;
                None
            }
            Action::LeaveQuestion => {
                self.focus = Pane::Schema;
                None
            }
            Action::Edit(key) => {
                if self.focus == Pane::Question {
                    self.question.input(key);
                }
                None
            }
        }
    }

    fn move_cursor(&mut self, down: bool) {
        match self.focus {
            Pane::Databases if down => self.databases.select_next(),
            Pane::Databases => self.databases.select_previous(),
            Pane::Tables if down => self.tables.select_next(),
            Pane::Tables => self.tables.select_previous(),
            Pane::Schema => {
                if let Some(schema) = self.schema.as_mut() {
                    schema.selected = step(schema.selected, schema.columns.len(), down);
                }
            }
            Pane::Results => {
                if let Some(results) = self.results.as_mut() {
                    results.selected = step(results.selected, results.rows.len(), down);
                }
            }
            Pane::Question | Pane::Sql => {}
        }
    }

    fn confirm(&mut self) -> Option<Command> {
        match self.focus {
            Pane::Databases => {
                let database = self.databases.current()?.to_string();
                Some(self.open_database(database))
            }
            Pane::Tables => {
                let table = self.tables.current()?.to_string();
                self.open_table(table)
            }
            Pane::Schema => {
                self.focus = Pane::Question;
                None
            }
            Pane::Sql => self.execute_current(),
            Pane::Question => self.ask(),
            Pane::Results => None,
        }
    }

    fn open_database(&mut self, database: String) -> Command {
        self.active_database = Some(database.clone());
        self.active_table = None;
        self.tables.clear();
        self.schema = None;
        self.sql.clear();
        self.results = None;
        self.focus = Pane::Tables;
        Command::LoadTables { database }
    }

    fn open_table(&mut self, table: String) -> Option<Command> {
        let database = self.active_database.clone()?;
        self.active_table = Some(table.clone());
        self.schema = None;
        self.results = None;
        self.focus = Pane::Schema;
        Some(Command::LoadSchema { database, table })
    }

    fn refresh(&mut self) -> Option<Command> {
        match (self.focus, &self.active_database, &self.active_table) {
            (Pane::Tables, Some(database), _) => Some(Command::LoadTables {
                database: database.clone(),
            }),
            (Pane::Schema, Some(database), Some(table)) => Some(Command::LoadSchema {
                database: database.clone(),
                table: table.clone(),
            }),
            _ => Some(Command::LoadDatabases),
        }
    }

    fn ask(&mut self) -> Option<Command> {
        if self.busy.is_some() {
            self.notify(NotificationLevel::Warning, "A request is already running");
            return None;
        }
        let question = self.question_text();
        if question.trim().is_empty() {
            self.notify(NotificationLevel::Warning, "Type a question first");
            return None;
        }
        let Some(schema) = self.schema.as_ref() else {
            self.notify(NotificationLevel::Warning, "Select a table to describe first");
            return None;
        };
        let command = Command::Generate {
            database: schema.database.clone(),
            table: schema.table.clone(),
            question,
            schema_str: schema.schema_str.clone(),
        };
        self.sql.clear();
        self.busy = Some(Busy::Generating);
        self.execute_after_generate = true;
        Some(command)
    }

    fn execute_current(&mut self) -> Option<Command> {
        if self.busy.is_some() {
            self.notify(NotificationLevel::Warning, "A request is already running");
            return None;
        }
        self.execute_sql(self.sql.clone())
    }

    fn execute_sql(&mut self, sql: String) -> Option<Command> {
        if sql.trim().is_empty() {
            self.notify(NotificationLevel::Warning, "No SQL to execute");
            return None;
        }
        let Some(database) = self.active_database.clone() else {
            self.notify(NotificationLevel::Warning, "Select a database first");
            return None;
        };
        self.busy = Some(Busy::Executing);
        Some(Command::Execute { database, sql })
    }

    /// Whether `database` (and `table`, when given) is still selected.
    fn is_open(&self, database: &str, table: Option<&str>) -> bool {
        self.active_database.as_deref() == Some(database)
            && table.map_or(true, |t| self.active_table.as_deref() == Some(t))
    }

    /// Outcomes for a database or table that has since been closed are
    /// dropped. A dropped generation or execution still clears `busy`.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Command> {
        match outcome {
            Outcome::Databases(Ok(databases)) => {
                if databases.is_empty() {
                    self.notify(NotificationLevel::Warning, "No databases visible to this login");
                }
                self.databases.replace(databases);
                let restored = self.restore.database.take()?;
                if self.databases.select_named(&restored) {
                    Some(self.open_database(restored))
                } else {
                    self.restore.table = None;
                    None
                }
            }
            Outcome::Databases(Err(err)) => {
                self.notify(
                    NotificationLevel::Error,
                    format!("Failed to load databases: {}", err),
                );
                None
            }
            Outcome::Tables { database, result } => {
                if !self.is_open(&database, None) {
                    return None;
                }
                match result {
                    Ok(tables) => {
                        self.tables.replace(tables);
                        let restored = self.restore.table.take()?;
                        if self.tables.select_named(&restored) {
                            self.open_table(restored)
                        } else {
                            None
                        }
                    }
                    Err(err) => {
                        self.restore.table = None;
                        self.notify(
                            NotificationLevel::Error,
                            format!("Failed to load tables of {}: {}", database, err),
                        );
                        None
                    }
                }
            }
            Outcome::Schema {
                database,
                table,
                result,
            } => {
                if !self.is_open(&database, Some(&table)) {
                    return None;
                }
                match result {
                    Ok(response) => {
                        self.schema = Some(TableSchema {
                            database,
                            table,
                            columns: response.schema,
                            schema_str: response.schema_str,
                            selected: 0,
                        });
                    }
                    Err(err) => {
                        self.notify(
                            NotificationLevel::Error,
                            format!("Failed to describe {}: {}", table, err),
                        );
                    }
                }
                None
            }
            Outcome::Generated {
                database,
                table,
                result,
            } => {
                self.busy = None;
                let execute = std::mem::take(&mut self.execute_after_generate);
                if !self.is_open(&database, Some(&table)) {
                    return None;
                }
                match result {
                    Ok(sql) => {
                        self.sql = sql;
                        if self.sql.trim().is_empty() {
                            self.notify(NotificationLevel::Warning, "No SQL was generated");
                            return None;
                        }
                        self.focus = Pane::Sql;
                        if execute {
                            self.execute_sql(self.sql.clone())
                        } else {
                            None
                        }
                    }
                    Err(err) => {
                        self.notify(
                            NotificationLevel::Error,
                            format!("Failed to generate SQL: {}", err),
                        );
                        None
                    }
                }
            }
            Outcome::Executed {
                database,
                sql,
                result,
            } => {
                self.busy = None;
                if !self.is_open(&database, None) {
                    return None;
                }
                match result {
                    Ok(response) => {
                        let results = ResultsView::new(sql, response);
                        self.notify(
                            NotificationLevel::Success,
                            format!("{} row(s) returned", results.row_count),
                        );
                        self.results = Some(results);
                        self.focus = Pane::Results;
                    }
                    Err(err) => {
                        self.notify(
                            NotificationLevel::Error,
                            format!("Failed to execute SQL: {}", err),
                        );
                    }
                }
                None
            }
        }
    }
}

fn step(current: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        0
    } else if down {
        (current + 1).min(len - 1)
    } else {
        current.saturating_sub(1)
    }
}
