//! sqlagent Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - A fake connection provider that records every connect and close
//! - A scripted completion provider
//! - Fixtures for the schemas used across test suites
//! - Proptest generators for model responses

pub use sqlagent_core::{
    AgentError, AgentResult, ColumnInfo, ConnectionProvider, DbError, LlmError, QueryResult,
    ResultSet, SchemaDescription, SqlConnection, SqlValue,
};
pub use sqlagent_llm::{CompletionProvider, CompletionRequest};

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ============================================================================
// FAKE DATABASE
// ============================================================================

/// What a fake server knows about.
#[derive(Debug, Clone, Default)]
struct FakeCatalog {
    databases: Vec<String>,
    tables: HashMap<String, Vec<String>>,
    schemas: HashMap<(String, String), Vec<ColumnInfo>>,
    results: HashMap<String, Result<ResultSet, String>>,
    refuse_connect: Option<String>,
}

/// Everything the fake observed.
#[derive(Debug, Default)]
struct FakeLog {
    connects: Vec<Option<String>>,
    closes: usize,
    statements: Vec<String>,
}

/// In-memory connection provider with call recording.
///
/// Clones share the same log, so a test can hand one clone to the code
/// under test and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct FakeConnectionProvider {
    catalog: Arc<FakeCatalog>,
    log: Arc<Mutex<FakeLog>>,
}

impl FakeConnectionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn catalog_mut(&mut self) -> &mut FakeCatalog {
        Arc::make_mut(&mut self.catalog)
    }

    /// Register a database with the given table names.
    pub fn with_database(mut self, name: &str, tables: &[&str]) -> Self {
        let catalog = self.catalog_mut();
        if !catalog.databases.iter().any(|db| db == name) {
            catalog.databases.push(name.to_string());
        }
        catalog
            .tables
            .insert(name.to_string(), tables.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Register a table's columns under a database.
    pub fn with_schema(mut self, database: &str, schema: SchemaDescription) -> Self {
        let catalog = self.catalog_mut();
        let tables = catalog.tables.entry(database.to_string()).or_default();
        if !tables.contains(&schema.table) {
            tables.push(schema.table.clone());
        }
        if !catalog.databases.iter().any(|db| db == database) {
            catalog.databases.push(database.to_string());
        }
        catalog
            .schemas
            .insert((database.to_string(), schema.table), schema.columns);
        self
    }

    /// Script the result of an exact SQL string.
    pub fn with_result(mut self, sql: &str, set: ResultSet) -> Self {
        self.catalog_mut().results.insert(sql.to_string(), Ok(set));
        self
    }

    /// Script a driver failure for an exact SQL string.
    pub fn with_failure(mut self, sql: &str, reason: &str) -> Self {
        self.catalog_mut()
            .results
            .insert(sql.to_string(), Err(reason.to_string()));
        self
    }

    /// Make every connect attempt fail.
    pub fn refusing_connections(mut self, reason: &str) -> Self {
        self.catalog_mut().refuse_connect = Some(reason.to_string());
        self
    }

    /// Number of successful connects.
    pub fn connect_count(&self) -> usize {
        lock(&self.log).connects.len()
    }

    /// Number of closes.
    pub fn close_count(&self) -> usize {
        lock(&self.log).closes
    }

    /// Connections opened but never closed.
    pub fn open_connections(&self) -> usize {
        let log = lock(&self.log);
        log.connects.len().saturating_sub(log.closes)
    }

    /// Target database of each connect, in order.
    pub fn connected_databases(&self) -> Vec<Option<String>> {
        lock(&self.log).connects.clone()
    }

    /// Statements passed to `run`, in order.
    pub fn statements(&self) -> Vec<String> {
        lock(&self.log).statements.clone()
    }
}

#[async_trait]
impl ConnectionProvider for FakeConnectionProvider {
    async fn connect(&self, database: Option<&str>) -> AgentResult<Box<dyn SqlConnection>> {
        if let Some(reason) = &self.catalog.refuse_connect {
            return Err(AgentError::connection("fake", reason.clone()));
        }
        lock(&self.log).connects.push(database.map(str::to_string));
        Ok(Box::new(FakeConnection {
            database: database.map(str::to_string),
            catalog: Arc::clone(&self.catalog),
            log: Arc::clone(&self.log),
        }))
    }
}

/// Connection handed out by [`FakeConnectionProvider`].
#[derive(Debug)]
pub struct FakeConnection {
    database: Option<String>,
    catalog: Arc<FakeCatalog>,
    log: Arc<Mutex<FakeLog>>,
}

impl FakeConnection {
    fn current_database(&self) -> AgentResult<&str> {
        self.database
            .as_deref()
            .ok_or_else(|| AgentError::execution("no database selected"))
    }
}

#[async_trait]
impl SqlConnection for FakeConnection {
    async fn databases(&mut self) -> AgentResult<Vec<String>> {
        Ok(self.catalog.databases.clone())
    }

    async fn tables(&mut self) -> AgentResult<Vec<String>> {
        let database = self.current_database()?;
        self.catalog
            .tables
            .get(database)
            .cloned()
            .ok_or_else(|| AgentError::execution(format!("database \"{}\" does not exist", database)))
    }

    async fn describe(&mut self, table: &str) -> AgentResult<Vec<ColumnInfo>> {
        let database = self.current_database()?;
        Ok(self
            .catalog
            .schemas
            .get(&(database.to_string(), table.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn run(&mut self, sql: &str) -> AgentResult<ResultSet> {
        lock(&self.log).statements.push(sql.to_string());
        match self.catalog.results.get(sql) {
            Some(Ok(set)) => Ok(set.clone()),
            Some(Err(reason)) => Err(AgentError::execution(reason.clone())),
            None => Err(AgentError::execution(format!(
                "syntax error at or near \"{}\"",
                sql.split_whitespace().next().unwrap_or_default()
            ))),
        }
    }

    async fn close(self: Box<Self>) {
        lock(&self.log).closes += 1;
    }
}

// ============================================================================
// MOCK COMPLETION PROVIDER
// ============================================================================

/// Completion provider that replays scripted responses and records prompts.
#[derive(Debug)]
pub struct MockCompletionProvider {
    scripted: Mutex<VecDeque<AgentResult<String>>>,
    fallback: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionProvider {
    /// Always answer with `response` once the script is exhausted.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            fallback: response.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail the next call with `error`.
    pub fn failing(error: LlmError) -> Self {
        let mock = Self::new("");
        mock.push(Err(error.into()));
        mock
    }

    /// Queue one scripted outcome.
    pub fn push(&self, outcome: AgentResult<String>) {
        lock(&self.scripted).push_back(outcome);
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    fn provider_id(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> AgentResult<String> {
        lock(&self.requests).push(request);
        match lock(&self.scripted).pop_front() {
            Some(outcome) => outcome,
            None => Ok(self.fallback.clone()),
        }
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Schemas and providers shared across suites.

    use super::*;

    /// `orders(id, customer_id, total, status, created_at)`.
    pub fn orders_schema() -> SchemaDescription {
        SchemaDescription::new(
            "orders",
            vec![
                ColumnInfo {
                    field: "id".to_string(),
                    column_type: "integer".to_string(),
                    null: "NO".to_string(),
                    key: "PRI".to_string(),
                    default: None,
                    extra: "identity".to_string(),
                },
                ColumnInfo {
                    field: "customer_id".to_string(),
                    column_type: "integer".to_string(),
                    null: "NO".to_string(),
                    key: "MUL".to_string(),
                    default: None,
                    extra: String::new(),
                },
                ColumnInfo::new("total", "numeric(10,2)"),
                ColumnInfo {
                    field: "status".to_string(),
                    column_type: "character varying(20)".to_string(),
                    null: "NO".to_string(),
                    key: String::new(),
                    default: Some("'pending'::character varying".to_string()),
                    extra: String::new(),
                },
                ColumnInfo::new("created_at", "timestamp without time zone"),
            ],
        )
    }

    /// `customers(id, name)`.
    pub fn customers_schema() -> SchemaDescription {
        SchemaDescription::from_pairs(
            "customers",
            [("id", "integer"), ("name", "character varying(50)")],
        )
    }

    pub const COUNT_ORDERS_SQL: &str = "SELECT COUNT(*) FROM orders;";

    /// A `shop` database with orders and customers, where counting orders
    /// yields 42.
    pub fn shop_provider() -> FakeConnectionProvider {
        FakeConnectionProvider::new()
            .with_database("postgres", &[])
            .with_schema("shop", orders_schema())
            .with_schema("shop", customers_schema())
            .with_result(
                COUNT_ORDERS_SQL,
                ResultSet::new(vec!["COUNT(*)".to_string()], vec![vec![SqlValue::Int(42)]]),
            )
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for model responses.

    use proptest::prelude::*;

    /// A line of SQL-ish text that never contains a newline.
    pub fn arb_sql_line() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("SELECT * FROM orders".to_string()),
            Just("SELECT `order id` FROM `orders`".to_string()),
            Just("WHERE total > 10".to_string()),
            Just("ORDER BY created_at DESC;".to_string()),
            "[A-Za-z0-9_ ,.*()=<>'`]{1,40}",
        ]
    }

    /// One or more SQL lines whose trimmed form neither starts nor ends
    /// with a fence.
    pub fn arb_sql_body() -> impl Strategy<Value = String> {
        prop::collection::vec(arb_sql_line(), 1..6)
            .prop_map(|lines| lines.join("\n"))
            .prop_filter("body must not look fenced", |body| {
                let trimmed = body.trim();
                !trimmed.is_empty() && !trimmed.starts_with("```") && !trimmed.ends_with("```")
            })
    }

    /// Optional language tag on an opening fence.
    pub fn arb_language_tag() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("sql".to_string()),
            Just("SQL".to_string()),
            Just("postgresql".to_string()),
            "[a-z]{1,10}",
        ]
    }

    /// Surrounding whitespace the model might emit.
    pub fn arb_padding() -> impl Strategy<Value = String> {
        "[ \n\t]{0,4}"
    }
}
