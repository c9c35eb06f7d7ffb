use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use proptest::prelude::*;
use ratatui::style::Color;
use serde_json::{json, Map, Value};
use sqlagent_api::error::ErrorCode;
use sqlagent_api::types::{ExecuteSqlResponse, SchemaResponse};
use sqlagent_core::{ColumnInfo, SchemaDescription};
use sqlagent_tui::api_client::ApiClientError;
use sqlagent_tui::config::{config_path_from_args, ConfigError, ThemeConfig, TuiConfig};
use sqlagent_tui::events::{Command, Outcome};
use sqlagent_tui::keys::{map_key, Action};
use sqlagent_tui::nav::Pane;
use sqlagent_tui::notifications::NotificationLevel;
use sqlagent_tui::persistence::{self, PersistedState};
use sqlagent_tui::state::{cell_text, App, Busy, Selection};
use sqlagent_tui::theme::Theme;
use sqlagent_tui::widgets::{column_widths, SqlHighlighter};
use std::path::PathBuf;

const VALID_TOML: &str = r#"
api_base_url = "http://localhost:5000"
request_timeout_ms = 5000
persistence_path = "tmp/sqlagent-tui.json"

[theme]
name = "synthbrute"
"#;

fn base_config() -> TuiConfig {
    TuiConfig {
        api_base_url: "http://localhost:5000".to_string(),
        request_timeout_ms: 5_000,
        persistence_path: "tmp/sqlagent-tui.json".into(),
        theme: ThemeConfig {
            name: "synthbrute".to_string(),
        },
    }
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

fn plain(code: KeyCode) -> KeyEvent {
    key(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    key(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn app() -> App {
    App::new(base_config(), PersistedState::default())
}

fn press(app: &mut App, event: KeyEvent) -> Option<Command> {
    let action = map_key(event, app.focus)?;
    app.handle_action(action)
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, plain(KeyCode::Char(ch)));
    }
}

fn orders_schema() -> SchemaResponse {
    let description = SchemaDescription::new(
        "orders",
        vec![
            ColumnInfo::new("id", "integer"),
            ColumnInfo::new("total", "numeric(10,2)"),
        ],
    );
    SchemaResponse {
        success: true,
        schema_str: description.render(),
        schema: description.columns,
    }
}

fn count_response() -> ExecuteSqlResponse {
    let mut row = Map::new();
    row.insert("count".to_string(), json!(42));
    ExecuteSqlResponse {
        success: true,
        columns: vec!["count".to_string()],
        rows: vec![row],
        row_count: 1,
    }
}

fn failure(code: ErrorCode, message: &str) -> ApiClientError {
    ApiClientError::Api {
        code,
        message: message.to_string(),
    }
}

/// Databases loaded, `shop` opened, `orders` described.
fn app_with_schema() -> App {
    let mut app = app();
    app.apply(Outcome::Databases(Ok(vec![
        "postgres".to_string(),
        "shop".to_string(),
    ])));
    press(&mut app, plain(KeyCode::Down));
    press(&mut app, plain(KeyCode::Enter));
    app.apply(Outcome::Tables {
        database: "shop".to_string(),
        result: Ok(vec!["orders".to_string()]),
    });
    press(&mut app, plain(KeyCode::Enter));
    app.apply(Outcome::Schema {
        database: "shop".to_string(),
        table: "orders".to_string(),
        result: Ok(orders_schema()),
    });
    app
}

fn generated(result: Result<String, ApiClientError>) -> Outcome {
    Outcome::Generated {
        database: "shop".to_string(),
        table: "orders".to_string(),
        result,
    }
}

fn executed(sql: String, result: Result<ExecuteSqlResponse, ApiClientError>) -> Outcome {
    Outcome::Executed {
        database: "shop".to_string(),
        sql,
        result,
    }
}

fn last_level(app: &App) -> Option<NotificationLevel> {
    app.last_notification().map(|n| n.level)
}

// ============================================================================
// CONFIG
// ============================================================================

#[test]
fn config_parses_valid_toml() -> Result<(), ConfigError> {
    let config = TuiConfig::parse(VALID_TOML)?;
    assert_eq!(config.api_base_url, "http://localhost:5000");
    assert_eq!(config.request_timeout_ms, 5_000);
    assert_eq!(config.persistence_path, PathBuf::from("tmp/sqlagent-tui.json"));
    assert_eq!(config.theme.name, "synthbrute");
    Ok(())
}

#[test]
fn config_has_no_defaults() {
    let toml = VALID_TOML.replace("request_timeout_ms = 5000\n", "");
    assert!(matches!(TuiConfig::parse(&toml), Err(ConfigError::Parse(_))));
}

#[test]
fn config_rejects_unknown_fields() {
    let toml = VALID_TOML.replace(
        "request_timeout_ms = 5000\n",
        "request_timeout_ms = 5000\nrefresh_interval_ms = 10\n",
    );
    assert!(matches!(TuiConfig::parse(&toml), Err(ConfigError::Parse(_))));
}

#[test]
fn config_requires_known_theme() {
    let mut config = base_config();
    config.theme = ThemeConfig {
        name: "unknown".to_string(),
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "theme.name", .. })
    ));
}

#[test]
fn config_requires_timeout() {
    let mut config = base_config();
    config.request_timeout_ms = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "request_timeout_ms", .. })
    ));
}

#[test]
fn config_requires_http_base_url() {
    for url in ["", "   ", "localhost:5000", "ftp://example.com"] {
        let mut config = base_config();
        config.api_base_url = url.to_string();
        assert!(
            matches!(
                config.validate(),
                Err(ConfigError::InvalidValue { field: "api_base_url", .. })
            ),
            "{url:?} should be rejected"
        );
    }
}

#[test]
fn config_requires_persistence_path() {
    let mut config = base_config();
    config.persistence_path = PathBuf::new();
    assert!(config.validate().is_err());
}

#[test]
fn config_path_comes_from_flag() {
    let args = ["--verbose", "--config", "tui.toml"].map(String::from);
    assert_eq!(config_path_from_args(args), Some(PathBuf::from("tui.toml")));
    let args = ["--config=other.toml"].map(String::from);
    assert_eq!(config_path_from_args(args), Some(PathBuf::from("other.toml")));
    let args = ["--config"].map(String::from);
    assert_eq!(config_path_from_args(args), None);
}

// ============================================================================
// THEME
// ============================================================================

#[test]
fn theme_names_resolve() {
    for name in Theme::NAMES {
        assert!(Theme::from_name(name).is_some());
    }
    assert_eq!(Theme::from_name(" SynthBrute "), Some(Theme::synthbrute()));
    assert!(Theme::from_name("solarized").is_none());
}

#[test]
fn focused_border_uses_focus_color() {
    let theme = Theme::synthbrute();
    assert_eq!(theme.border_color(true), theme.border_focus);
    assert_eq!(theme.border_color(false), theme.border);
}

// ============================================================================
// KEYS AND NAVIGATION
// ============================================================================

#[test]
fn quit_keys_outside_question() {
    assert_eq!(map_key(plain(KeyCode::Char('q')), Pane::Databases), Some(Action::Quit));
    assert_eq!(map_key(ctrl('c'), Pane::Results), Some(Action::Quit));
    assert_eq!(map_key(ctrl('c'), Pane::Question), Some(Action::Quit));
}

#[test]
fn question_pane_captures_text() {
    let q = plain(KeyCode::Char('q'));
    assert_eq!(map_key(q, Pane::Question), Some(Action::Edit(q)));
    assert_eq!(map_key(plain(KeyCode::Esc), Pane::Question), Some(Action::LeaveQuestion));
    assert_eq!(map_key(plain(KeyCode::Enter), Pane::Question), Some(Action::Ask));
    assert_eq!(map_key(ctrl('g'), Pane::Question), Some(Action::Ask));
    let newline = key(KeyCode::Enter, KeyModifiers::ALT);
    assert_eq!(map_key(newline, Pane::Question), Some(Action::Edit(newline)));
}

#[test]
fn key_release_is_ignored() {
    let mut event = plain(KeyCode::Char('q'));
    event.kind = KeyEventKind::Release;
    assert_eq!(map_key(event, Pane::Databases), None);
}

proptest! {
    #[test]
    fn printable_keys_edit_question(ch in proptest::char::range(' ', '~')) {
        let event = plain(KeyCode::Char(ch));
        prop_assert_eq!(map_key(event, Pane::Question), Some(Action::Edit(event)));
    }

    #[test]
    fn tab_cycles_from_every_pane(idx in 0usize..6) {
        let pane = Pane::all()[idx];
        prop_assert_eq!(map_key(plain(KeyCode::Tab), pane), Some(Action::NextPane));
        prop_assert_eq!(map_key(plain(KeyCode::BackTab), pane), Some(Action::PrevPane));
        prop_assert_eq!(pane.next().previous(), pane);
        let mut cycled = pane;
        for _ in 0..Pane::all().len() {
            cycled = cycled.next();
        }
        prop_assert_eq!(cycled, pane);
    }

    #[test]
    fn selection_stays_in_bounds(len in 0usize..8, moves in proptest::collection::vec(any::<bool>(), 0..32)) {
        let mut selection = Selection::default();
        selection.replace((0..len).map(|i| format!("t{i}")).collect());
        for down in moves {
            if down {
                selection.select_next();
            } else {
                selection.select_previous();
            }
            match selection.selected {
                Some(idx) => prop_assert!(idx < len),
                None => prop_assert_eq!(len, 0),
            }
        }
    }
}

#[test]
fn selection_wraps() {
    let mut selection = Selection::default();
    selection.replace(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(selection.current(), Some("a"));
    selection.select_previous();
    assert_eq!(selection.current(), Some("b"));
    selection.select_next();
    assert_eq!(selection.current(), Some("a"));
    assert!(selection.select_named("b"));
    assert!(!selection.select_named("c"));
    assert_eq!(selection.current(), Some("b"));
}

// ============================================================================
// APPLICATION FLOW
// ============================================================================

#[test]
fn enter_on_database_loads_tables() {
    let mut app = app();
    let next = app.apply(Outcome::Databases(Ok(vec![
        "postgres".to_string(),
        "shop".to_string(),
    ])));
    assert_eq!(next, None);
    press(&mut app, plain(KeyCode::Char('j')));
    let command = press(&mut app, plain(KeyCode::Enter));
    assert_eq!(
        command,
        Some(Command::LoadTables {
            database: "shop".to_string()
        })
    );
    assert_eq!(app.focus, Pane::Tables);
    assert_eq!(app.active_database.as_deref(), Some("shop"));
}

#[test]
fn enter_on_table_loads_schema() {
    let mut app = app();
    app.apply(Outcome::Databases(Ok(vec!["shop".to_string()])));
    press(&mut app, plain(KeyCode::Enter));
    app.apply(Outcome::Tables {
        database: "shop".to_string(),
        result: Ok(vec!["customers".to_string(), "orders".to_string()]),
    });
    press(&mut app, plain(KeyCode::Down));
    let command = press(&mut app, plain(KeyCode::Enter));
    assert_eq!(
        command,
        Some(Command::LoadSchema {
            database: "shop".to_string(),
            table: "orders".to_string()
        })
    );
    assert_eq!(app.focus, Pane::Schema);
}

#[test]
fn stale_tables_are_dropped() {
    let mut app = app();
    app.apply(Outcome::Databases(Ok(vec!["a".to_string(), "b".to_string()])));
    press(&mut app, plain(KeyCode::Enter));
    app.focus = Pane::Databases;
    press(&mut app, plain(KeyCode::Down));
    press(&mut app, plain(KeyCode::Enter));
    app.apply(Outcome::Tables {
        database: "a".to_string(),
        result: Ok(vec!["from_a".to_string()]),
    });
    assert!(app.tables.items.is_empty());
    app.apply(Outcome::Tables {
        database: "b".to_string(),
        result: Ok(vec!["from_b".to_string()]),
    });
    assert_eq!(app.tables.items, vec!["from_b".to_string()]);
}

#[test]
fn schema_is_shown_for_open_table() {
    let app = app_with_schema();
    let schema = app.schema.as_ref().map(|s| s.schema_str.clone());
    assert_eq!(
        schema.as_deref(),
        Some("Table: orders\nColumns:\nid (integer)\ntotal (numeric(10,2))")
    );
}

#[test]
fn ask_needs_a_question() {
    let mut app = app_with_schema();
    app.focus = Pane::Question;
    type_text(&mut app, "   ");
    assert_eq!(press(&mut app, ctrl('g')), None);
    assert_eq!(last_level(&app), Some(NotificationLevel::Warning));
    assert_eq!(app.busy, None);
}

#[test]
fn ask_needs_a_schema() {
    let mut app = app();
    app.focus = Pane::Question;
    type_text(&mut app, "how many orders?");
    assert_eq!(press(&mut app, plain(KeyCode::Enter)), None);
    assert_eq!(last_level(&app), Some(NotificationLevel::Warning));
}

#[test]
fn ask_generates_then_executes() {
    let mut app = app_with_schema();
    press(&mut app, plain(KeyCode::Char('i')));
    assert_eq!(app.focus, Pane::Question);
    type_text(&mut app, "how many orders?");

    let command = press(&mut app, plain(KeyCode::Enter));
    assert_eq!(
        command,
        Some(Command::Generate {
            database: "shop".to_string(),
            table: "orders".to_string(),
            question: "how many orders?".to_string(),
            schema_str: "Table: orders\nColumns:\nid (integer)\ntotal (numeric(10,2))"
                .to_string(),
        })
    );
    assert_eq!(app.busy, Some(Busy::Generating));

    let sql = "SELECT COUNT(*) AS count FROM orders;".to_string();
    let command = app.apply(generated(Ok(sql.clone())));
    assert_eq!(
        command,
        Some(Command::Execute {
            database: "shop".to_string(),
            sql: sql.clone()
        })
    );
    assert_eq!(app.sql, sql);
    assert_eq!(app.busy, Some(Busy::Executing));

    let command = app.apply(executed(sql, Ok(count_response())));
    assert_eq!(command, None);
    assert_eq!(app.busy, None);
    assert_eq!(app.focus, Pane::Results);
    let results = app.results.as_ref().map(|r| (r.columns.clone(), r.rows.clone()));
    assert_eq!(
        results,
        Some((vec!["count".to_string()], vec![vec!["42".to_string()]]))
    );
    assert_eq!(last_level(&app), Some(NotificationLevel::Success));
}

#[test]
fn second_ask_while_busy_is_refused() {
    let mut app = app_with_schema();
    app.focus = Pane::Question;
    type_text(&mut app, "count orders");
    assert!(press(&mut app, ctrl('g')).is_some());
    assert_eq!(press(&mut app, ctrl('g')), None);
    assert_eq!(last_level(&app), Some(NotificationLevel::Warning));
}

#[test]
fn generation_failure_is_reported() {
    let mut app = app_with_schema();
    app.focus = Pane::Question;
    type_text(&mut app, "count orders");
    press(&mut app, ctrl('g'));
    let command = app.apply(generated(Err(failure(
        ErrorCode::TranslationFailed,
        "Completion service not configured",
    ))));
    assert_eq!(command, None);
    assert_eq!(app.busy, None);
    let message = app.last_notification().map(|n| n.message.clone()).unwrap_or_default();
    assert!(message.starts_with("Failed to generate SQL"));
    assert!(message.contains("Completion service not configured"));
}

#[test]
fn blank_generation_is_not_executed() {
    let mut app = app_with_schema();
    app.focus = Pane::Question;
    type_text(&mut app, "count orders");
    press(&mut app, ctrl('g'));
    assert_eq!(app.apply(generated(Ok(String::new()))), None);
    assert_eq!(last_level(&app), Some(NotificationLevel::Warning));
}

#[test]
fn execution_failure_keeps_previous_results() {
    let mut app = app_with_schema();
    let sql = "SELECT COUNT(*) AS count FROM orders;".to_string();
    app.sql = sql.clone();
    let command = press(&mut app, ctrl('e'));
    assert!(matches!(command, Some(Command::Execute { .. })));
    app.apply(executed(sql, Ok(count_response())));

    let bad = "SELEC 1".to_string();
    app.sql = bad.clone();
    press(&mut app, ctrl('e'));
    app.apply(executed(
        bad,
        Err(failure(
            ErrorCode::ExecutionFailed,
            "syntax error at or near \"SELEC\"",
        )),
    ));
    assert_eq!(last_level(&app), Some(NotificationLevel::Error));
    assert_eq!(app.results.as_ref().map(|r| r.row_count), Some(1));
}

#[test]
fn generation_for_a_closed_database_is_dropped() {
    let mut app = app_with_schema();
    app.focus = Pane::Question;
    type_text(&mut app, "how many orders?");
    assert!(press(&mut app, ctrl('g')).is_some());

    app.focus = Pane::Databases;
    press(&mut app, plain(KeyCode::Up));
    press(&mut app, plain(KeyCode::Enter));
    assert_eq!(app.active_database.as_deref(), Some("postgres"));

    let command = app.apply(generated(Ok("SELECT COUNT(*) FROM orders;".to_string())));
    assert_eq!(command, None);
    assert_eq!(app.busy, None);
    assert!(app.sql.is_empty());
    assert!(app.results.is_none());
}

#[test]
fn generation_for_a_closed_table_is_dropped() {
    let mut app = app_with_schema();
    app.focus = Pane::Question;
    type_text(&mut app, "how many orders?");
    press(&mut app, ctrl('g'));
    app.active_table = Some("customers".to_string());

    assert_eq!(app.apply(generated(Ok("SELECT 1".to_string()))), None);
    assert_eq!(app.busy, None);
    assert!(app.sql.is_empty());
}

#[test]
fn execution_for_a_closed_database_is_dropped() {
    let mut app = app_with_schema();
    app.sql = "SELECT COUNT(*) AS count FROM orders;".to_string();
    assert!(press(&mut app, ctrl('e')).is_some());

    app.focus = Pane::Databases;
    press(&mut app, plain(KeyCode::Up));
    press(&mut app, plain(KeyCode::Enter));

    let command = app.apply(executed(
        "SELECT COUNT(*) AS count FROM orders;".to_string(),
        Ok(count_response()),
    ));
    assert_eq!(command, None);
    assert_eq!(app.busy, None);
    assert!(app.results.is_none());
    assert_eq!(app.focus, Pane::Tables);
}

#[test]
fn execute_without_sql_warns() {
    let mut app = app_with_schema();
    app.focus = Pane::Sql;
    assert_eq!(press(&mut app, plain(KeyCode::Enter)), None);
    assert_eq!(last_level(&app), Some(NotificationLevel::Warning));
}

#[test]
fn selecting_another_database_resets_query_state() {
    let mut app = app_with_schema();
    app.sql = "SELECT 1".to_string();
    app.focus = Pane::Databases;
    press(&mut app, plain(KeyCode::Up));
    press(&mut app, plain(KeyCode::Enter));
    assert_eq!(app.active_database.as_deref(), Some("postgres"));
    assert_eq!(app.active_table, None);
    assert!(app.schema.is_none());
    assert!(app.sql.is_empty());
    assert!(app.results.is_none());
}

#[test]
fn refresh_reloads_focused_list() {
    let mut app = app_with_schema();
    app.focus = Pane::Tables;
    assert_eq!(
        press(&mut app, plain(KeyCode::Char('r'))),
        Some(Command::LoadTables {
            database: "shop".to_string()
        })
    );
    app.focus = Pane::Databases;
    assert_eq!(press(&mut app, ctrl('r')), Some(Command::LoadDatabases));
}

#[test]
fn load_errors_show_in_status_bar() {
    let mut app = app();
    app.apply(Outcome::Databases(Err(failure(
        ErrorCode::ConnectionFailed,
        "connection refused",
    ))));
    let note = app.last_notification().map(|n| (n.level, n.message.clone()));
    assert_eq!(
        note,
        Some((
            NotificationLevel::Error,
            "Failed to load databases: ConnectionFailed: connection refused".to_string()
        ))
    );
}

#[test]
fn quit_sets_flag() {
    let mut app = app();
    press(&mut app, plain(KeyCode::Char('q')));
    assert!(app.should_quit);
}

// ============================================================================
// PERSISTENCE
// ============================================================================

#[test]
fn saved_selection_is_restored() {
    let restore = PersistedState {
        database: Some("shop".to_string()),
        table: Some("orders".to_string()),
    };
    let mut app = App::new(base_config(), restore.clone());

    let command = app.apply(Outcome::Databases(Ok(vec![
        "postgres".to_string(),
        "shop".to_string(),
    ])));
    assert_eq!(
        command,
        Some(Command::LoadTables {
            database: "shop".to_string()
        })
    );
    let command = app.apply(Outcome::Tables {
        database: "shop".to_string(),
        result: Ok(vec!["customers".to_string(), "orders".to_string()]),
    });
    assert_eq!(
        command,
        Some(Command::LoadSchema {
            database: "shop".to_string(),
            table: "orders".to_string()
        })
    );
    assert_eq!(app.tables.current(), Some("orders"));
    assert_eq!(app.persisted(), restore);

    // only applied once
    assert_eq!(
        app.apply(Outcome::Databases(Ok(vec!["shop".to_string()]))),
        None
    );
}

#[test]
fn vanished_database_is_not_restored() {
    let restore = PersistedState {
        database: Some("gone".to_string()),
        table: Some("orders".to_string()),
    };
    let mut app = App::new(base_config(), restore);
    assert_eq!(app.apply(Outcome::Databases(Ok(vec!["shop".to_string()]))), None);
    assert_eq!(app.active_database, None);
    assert!(app.persisted().is_empty());
}

#[test]
fn persisted_state_survives_save_and_load() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("state.json");
    assert_eq!(persistence::load(&path)?, PersistedState::default());

    let state = PersistedState {
        database: Some("shop".to_string()),
        table: None,
    };
    persistence::save(&path, &state)?;
    assert_eq!(persistence::load(&path)?, state);
    Ok(())
}

#[test]
fn corrupt_state_file_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("state.json");
    std::fs::write(&path, "not json")?;
    assert!(persistence::load(&path).is_err());
    Ok(())
}

// ============================================================================
// RENDERING HELPERS
// ============================================================================

fn highlighter() -> SqlHighlighter {
    SqlHighlighter {
        keyword_color: Color::Cyan,
        function_color: Color::Magenta,
        string_color: Color::Yellow,
        number_color: Color::Green,
        comment_color: Color::Gray,
    }
}

fn spans_with_color(line: &ratatui::text::Line<'_>, color: Color) -> Vec<String> {
    line.spans
        .iter()
        .filter(|span| span.style.fg == Some(color))
        .map(|span| span.content.to_string())
        .collect()
}

#[test]
fn highlighter_marks_sql_tokens() {
    let line = highlighter().highlight_line("select count(*) from orders where status = 'it''s' and total > 10.5 -- note");
    assert_eq!(spans_with_color(&line, Color::Cyan), vec!["select", "from", "where", "and"]);
    assert_eq!(spans_with_color(&line, Color::Magenta), vec!["count"]);
    assert_eq!(spans_with_color(&line, Color::Yellow), vec!["'it''s'"]);
    assert_eq!(spans_with_color(&line, Color::Green), vec!["10.5"]);
    assert_eq!(spans_with_color(&line, Color::Gray), vec!["-- note"]);
}

#[test]
fn highlighter_keeps_line_structure() {
    let text = highlighter().highlight("SELECT id\nFROM orders\nLIMIT 5;");
    assert_eq!(text.lines.len(), 3);
}

proptest! {
    #[test]
    fn highlighting_preserves_text(sql in "[ -~]{0,80}") {
        let line = highlighter().highlight_line(&sql);
        let rebuilt: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        prop_assert_eq!(rebuilt, sql);
    }

    #[test]
    fn column_widths_are_clamped(
        headers in proptest::collection::vec("[a-z]{0,60}", 1..5),
        cell in "[a-z ]{0,60}",
    ) {
        let rows = vec![vec![cell; headers.len()]];
        let widths = column_widths(&headers, &rows, 40);
        prop_assert_eq!(widths.len(), headers.len());
        for width in widths {
            prop_assert!((1..=40).contains(&width));
        }
    }
}

#[test]
fn column_width_follows_widest_cell() {
    let headers = vec!["id".to_string(), "name".to_string()];
    let rows = vec![
        vec!["1".to_string(), "Ann".to_string()],
        vec!["1000".to_string(), "Bo".to_string()],
    ];
    assert_eq!(column_widths(&headers, &rows, 40), vec![4, 4]);
}

#[test]
fn cells_render_as_text() {
    assert_eq!(cell_text(&Value::Null), "NULL");
    assert_eq!(cell_text(&json!("paid")), "paid");
    assert_eq!(cell_text(&json!(12.5)), "12.5");
    assert_eq!(cell_text(&json!(true)), "true");
    assert_eq!(cell_text(&json!({"a": 1})), "{\"a\":1}");
}
