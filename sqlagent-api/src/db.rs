//! PostgreSQL connection provider.
//!
//! Every call to [`PgConnectionProvider::connect`] opens a brand new
//! `tokio_postgres` connection whose driver runs on its own task. Nothing is
//! pooled; the caller closes the connection when its single operation is
//! done.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlagent_core::{
    AgentError, AgentResult, ColumnInfo, ConnectionProvider, ResultSet, SqlConnection, SqlValue,
};
use tokio::task::JoinHandle;
use tokio_postgres::types::{FromSql, Type};
use tokio_postgres::{Client, Config, NoTls, Row, SimpleQueryMessage, SimpleQueryRow};

// ============================================================================
// CONNECTION CONFIGURATION
// ============================================================================

/// Database connection settings.
#[derive(Clone, PartialEq)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Database used when no database is named (catalog listing)
    pub default_database: String,
    /// Schema whose tables are listed and described
    pub schema: String,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "".to_string(),
            default_database: "postgres".to_string(),
            schema: "public".to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("SQLAGENT_DB_HOST").unwrap_or(defaults.host),
            port: lookup("SQLAGENT_DB_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            user: lookup("SQLAGENT_DB_USER").unwrap_or(defaults.user),
            password: lookup("SQLAGENT_DB_PASSWORD").unwrap_or_default(),
            default_database: lookup("SQLAGENT_DB_DEFAULT_DATABASE")
                .unwrap_or(defaults.default_database),
            schema: lookup("SQLAGENT_DB_SCHEMA").unwrap_or(defaults.schema),
            connect_timeout: lookup("SQLAGENT_DB_CONNECT_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
        }
    }

    /// `host:port/database`, used in logs and connection errors.
    pub fn target(&self, database: &str) -> String {
        format!("{}:{}/{}", self.host, self.port, database)
    }

    fn pg_config(&self, database: &str) -> Config {
        let mut cfg = Config::new();
        cfg.host(&self.host)
            .port(self.port)
            .user(&self.user)
            .password(&self.password)
            .dbname(database)
            .connect_timeout(self.connect_timeout)
            .application_name("sqlagent");
        cfg
    }
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("default_database", &self.default_database)
            .field("schema", &self.schema)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

// ============================================================================
// PROVIDER
// ============================================================================

/// Opens one fresh connection per call.
#[derive(Debug, Clone)]
pub struct PgConnectionProvider {
    config: DbConfig,
}

impl PgConnectionProvider {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }
}

#[async_trait]
impl ConnectionProvider for PgConnectionProvider {
    async fn connect(&self, database: Option<&str>) -> AgentResult<Box<dyn SqlConnection>> {
        let database = database.unwrap_or(&self.config.default_database);
        let target = self.config.target(database);

        let (client, connection) = self
            .config
            .pg_config(database)
            .connect(NoTls)
            .await
            .map_err(|e| AgentError::connection(target.clone(), driver_message(&e)))?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(error = %e, "Connection terminated with error");
            }
        });
        tracing::debug!(%target, "Connection opened");

        Ok(Box::new(PgConnection {
            client,
            driver,
            schema: self.config.schema.clone(),
            target,
        }))
    }
}

// ============================================================================
// CONNECTION
// ============================================================================

const LIST_DATABASES_SQL: &str =
    "SELECT datname::text FROM pg_database WHERE NOT datistemplate ORDER BY datname";

const LIST_TABLES_SQL: &str = "\
SELECT table_name::text
FROM information_schema.tables
WHERE table_schema = $1 AND table_type IN ('BASE TABLE', 'VIEW')
ORDER BY table_name";

const DESCRIBE_TABLE_SQL: &str = "\
SELECT c.column_name::text,
       c.data_type::text,
       c.udt_name::text,
       c.character_maximum_length::int4,
       c.numeric_precision::int4,
       c.numeric_scale::int4,
       c.is_nullable::text,
       c.column_default::text,
       c.is_identity::text,
       c.is_generated::text,
       COALESCE((
           SELECT string_agg(tc.constraint_type::text, ',')
           FROM information_schema.key_column_usage k
           JOIN information_schema.table_constraints tc
             ON tc.constraint_schema = k.constraint_schema
            AND tc.constraint_name = k.constraint_name
           WHERE k.table_schema = c.table_schema
             AND k.table_name = c.table_name
             AND k.column_name = c.column_name
       ), '')
FROM information_schema.columns c
WHERE c.table_schema = $1 AND c.table_name = $2
ORDER BY c.ordinal_position";

/// A single live connection plus the task driving it.
pub struct PgConnection {
    client: Client,
    driver: JoinHandle<()>,
    schema: String,
    target: String,
}

#[async_trait]
impl SqlConnection for PgConnection {
    async fn databases(&mut self) -> AgentResult<Vec<String>> {
        let rows = self
            .client
            .query(LIST_DATABASES_SQL, &[])
            .await
            .map_err(execution_error)?;
        rows.iter().map(|row| text_at(row, 0)).collect()
    }

    async fn tables(&mut self) -> AgentResult<Vec<String>> {
        let rows = self
            .client
            .query(LIST_TABLES_SQL, &[&self.schema])
            .await
            .map_err(execution_error)?;
        rows.iter().map(|row| text_at(row, 0)).collect()
    }

    async fn describe(&mut self, table: &str) -> AgentResult<Vec<ColumnInfo>> {
        let rows = self
            .client
            .query(DESCRIBE_TABLE_SQL, &[&self.schema, &table])
            .await
            .map_err(execution_error)?;
        rows.iter().map(column_info).collect()
    }

    async fn run(&mut self, sql: &str) -> AgentResult<ResultSet> {
        let statement = self.client.prepare(sql).await.map_err(execution_error)?;
        let columns: Vec<String> = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        let types: Vec<Type> = statement
            .columns()
            .iter()
            .map(|c| c.type_().clone())
            .collect();

        let rows = if types.iter().all(has_binary_decoder) {
            let rows = self
                .client
                .query(&statement, &[])
                .await
                .map_err(execution_error)?;
            rows.iter().map(decode_row).collect::<AgentResult<Vec<_>>>()?
        } else {
            // `prepare` only accepts a single command, so the simple query
            // protocol runs exactly that statement.
            tracing::debug!(database = %self.target, "Reading result set as text");
            let messages = self
                .client
                .simple_query(sql)
                .await
                .map_err(execution_error)?;
            messages
                .iter()
                .filter_map(|message| match message {
                    SimpleQueryMessage::Row(row) => Some(row),
                    _ => None,
                })
                .map(|row| decode_text_row(row, &types))
                .collect::<AgentResult<Vec<_>>>()?
        };
        Ok(ResultSet::new(columns, rows))
    }

    async fn close(self: Box<Self>) {
        let PgConnection {
            client,
            driver,
            target,
            ..
        } = *self;
        drop(client);
        if let Err(e) = driver.await {
            tracing::warn!(%target, error = %e, "Connection driver did not shut down cleanly");
        } else {
            tracing::debug!(%target, "Connection closed");
        }
    }
}

// ============================================================================
// ROW DECODING
// ============================================================================

fn driver_message(err: &tokio_postgres::Error) -> String {
    match err.as_db_error() {
        Some(db) => db.message().to_string(),
        None => err.to_string(),
    }
}

fn execution_error(err: tokio_postgres::Error) -> AgentError {
    AgentError::execution(driver_message(&err))
}

fn text_at(row: &Row, idx: usize) -> AgentResult<String> {
    row.try_get::<_, String>(idx).map_err(execution_error)
}

fn column_info(row: &Row) -> AgentResult<ColumnInfo> {
    let get_opt_text = |idx: usize| row.try_get::<_, Option<String>>(idx).map_err(execution_error);
    let get_opt_int = |idx: usize| row.try_get::<_, Option<i32>>(idx).map_err(execution_error);

    let data_type = text_at(row, 1)?;
    let udt_name = get_opt_text(2)?.unwrap_or_default();
    let column_type = format_column_type(
        &data_type,
        &udt_name,
        get_opt_int(3)?,
        get_opt_int(4)?,
        get_opt_int(5)?,
    );

    Ok(ColumnInfo {
        field: text_at(row, 0)?,
        column_type,
        null: get_opt_text(6)?.unwrap_or_else(|| "YES".to_string()),
        key: key_role(&text_at(row, 10)?).to_string(),
        default: get_opt_text(7)?,
        extra: extra_flags(get_opt_text(8)?.as_deref(), get_opt_text(9)?.as_deref()),
    })
}

/// Readable column type, e.g. `character varying(50)` or `numeric(10,2)`.
fn format_column_type(
    data_type: &str,
    udt_name: &str,
    max_length: Option<i32>,
    precision: Option<i32>,
    scale: Option<i32>,
) -> String {
    match (data_type, max_length, precision, scale) {
        ("USER-DEFINED", ..) | ("ARRAY", ..) => udt_name.to_string(),
        (_, Some(len), _, _) => format!("{}({})", data_type, len),
        ("numeric", None, Some(p), Some(s)) => format!("numeric({},{})", p, s),
        ("numeric", None, Some(p), None) => format!("numeric({})", p),
        _ => data_type.to_string(),
    }
}

/// Collapse the constraint types a column takes part in to one role.
fn key_role(constraint_types: &str) -> &'static str {
    let has = |kind: &str| constraint_types.split(',').any(|t| t.trim() == kind);
    if has("PRIMARY KEY") {
        "PRI"
    } else if has("UNIQUE") {
        "UNI"
    } else if has("FOREIGN KEY") {
        "MUL"
    } else {
        ""
    }
}

fn extra_flags(is_identity: Option<&str>, is_generated: Option<&str>) -> String {
    let mut flags = Vec::new();
    if is_identity == Some("YES") {
        flags.push("identity");
    }
    if is_generated == Some("ALWAYS") {
        flags.push("generated");
    }
    flags.join(" ")
}

/// Types read through the binary protocol. A result set with any other
/// column type is read as text instead.
fn has_binary_decoder(ty: &Type) -> bool {
    matches!(
        *ty,
        Type::BOOL
            | Type::INT2
            | Type::INT4
            | Type::INT8
            | Type::OID
            | Type::FLOAT4
            | Type::FLOAT8
            | Type::NUMERIC
            | Type::TEXT
            | Type::VARCHAR
            | Type::BPCHAR
            | Type::NAME
            | Type::UNKNOWN
            | Type::DATE
            | Type::TIME
            | Type::TIMESTAMP
            | Type::TIMESTAMPTZ
            | Type::BYTEA
            | Type::JSON
            | Type::JSONB
            | Type::UUID
    )
}

fn decode_row(row: &Row) -> AgentResult<Vec<SqlValue>> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| decode_cell(row, idx, column.type_()))
        .collect()
}

fn decode_cell(row: &Row, idx: usize, ty: &Type) -> AgentResult<SqlValue> {
    fn get<'a, T: FromSql<'a>>(row: &'a Row, idx: usize) -> AgentResult<Option<T>> {
        row.try_get::<_, Option<T>>(idx).map_err(execution_error)
    }

    let value: SqlValue = match *ty {
        Type::BOOL => get::<bool>(row, idx)?.into(),
        Type::INT2 => get::<i16>(row, idx)?.into(),
        Type::INT4 => get::<i32>(row, idx)?.into(),
        Type::INT8 => get::<i64>(row, idx)?.into(),
        Type::OID => get::<u32>(row, idx)?.into(),
        Type::FLOAT4 => get::<f32>(row, idx)?.into(),
        Type::FLOAT8 => get::<f64>(row, idx)?.into(),
        Type::NUMERIC => get::<PgNumeric>(row, idx)?
            .map(|n| n.0)
            .unwrap_or(SqlValue::Null),
        Type::DATE => get::<chrono::NaiveDate>(row, idx)?.into(),
        Type::TIME => get::<chrono::NaiveTime>(row, idx)?.into(),
        Type::TIMESTAMP => get::<chrono::NaiveDateTime>(row, idx)?.into(),
        Type::TIMESTAMPTZ => get::<chrono::DateTime<chrono::Utc>>(row, idx)?.into(),
        Type::BYTEA => get::<Vec<u8>>(row, idx)?.into(),
        Type::JSON | Type::JSONB => get::<serde_json::Value>(row, idx)?.into(),
        Type::UUID => get::<uuid::Uuid>(row, idx)?
            .map(|u| SqlValue::Other(u.to_string()))
            .unwrap_or(SqlValue::Null),
        // text, varchar, bpchar, name, unknown
        _ => get::<String>(row, idx)?.into(),
    };
    Ok(value)
}

/// NUMERIC in the binary format. Values `Decimal` cannot hold (NaN,
/// infinities, more than 28 significant digits) fall back to a float.
struct PgNumeric(SqlValue);

type FromSqlError = Box<dyn std::error::Error + Sync + Send>;

const NUMERIC_NEG: u16 = 0x4000;
const NUMERIC_NAN: u16 = 0xC000;
const NUMERIC_PINF: u16 = 0xD000;
const NUMERIC_NINF: u16 = 0xF000;

impl<'a> FromSql<'a> for PgNumeric {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, FromSqlError> {
        match Decimal::from_sql(ty, raw) {
            Ok(decimal) => Ok(PgNumeric(SqlValue::Decimal(decimal))),
            Err(_) => numeric_to_f64(raw).map(|f| PgNumeric(SqlValue::Float(f))),
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(*ty, Type::NUMERIC)
    }
}

/// Header is ndigits, weight, sign, dscale (all 16-bit), followed by
/// base-10000 digits.
fn numeric_to_f64(raw: &[u8]) -> Result<f64, FromSqlError> {
    let word = |i: usize| -> Result<u16, FromSqlError> {
        raw.get(i * 2..i * 2 + 2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
            .ok_or_else(|| "truncated numeric value".into())
    };

    let ndigits = usize::from(word(0)?);
    let weight = i32::from(word(1)? as i16);
    let value = match word(2)? {
        NUMERIC_NAN => f64::NAN,
        NUMERIC_PINF => f64::INFINITY,
        NUMERIC_NINF => f64::NEG_INFINITY,
        sign => {
            let mut value = 0.0;
            for i in 0..ndigits {
                let exponent = weight - i32::try_from(i)?;
                value += f64::from(word(4 + i)?) * 10_000f64.powi(exponent);
            }
            if sign == NUMERIC_NEG {
                -value
            } else {
                value
            }
        }
    };
    Ok(value)
}

fn decode_text_row(row: &SimpleQueryRow, types: &[Type]) -> AgentResult<Vec<SqlValue>> {
    types
        .iter()
        .enumerate()
        .map(|(idx, ty)| {
            let text = row.try_get(idx).map_err(execution_error)?;
            Ok(text.map(|t| decode_text(ty, t)).unwrap_or(SqlValue::Null))
        })
        .collect()
}

/// Decode a cell from PostgreSQL's text output (ISO `DateStyle`).
///
/// Types with a binary decoder map to the same variants here; text that
/// does not parse, and every other type, is kept as-is.
fn decode_text(ty: &Type, text: &str) -> SqlValue {
    let other = || SqlValue::Other(text.to_string());
    match *ty {
        Type::BOOL => match text {
            "t" => SqlValue::Bool(true),
            "f" => SqlValue::Bool(false),
            _ => other(),
        },
        Type::INT2 | Type::INT4 | Type::INT8 | Type::OID => {
            text.parse::<i64>().map(SqlValue::Int).unwrap_or_else(|_| other())
        }
        Type::FLOAT4 | Type::FLOAT8 => {
            text.parse::<f64>().map(SqlValue::Float).unwrap_or_else(|_| other())
        }
        Type::NUMERIC => Decimal::from_str(text)
            .map(SqlValue::Decimal)
            .or_else(|_| text.parse::<f64>().map(SqlValue::Float))
            .unwrap_or_else(|_| other()),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
            SqlValue::Text(text.to_string())
        }
        Type::DATE => chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(SqlValue::Date)
            .unwrap_or_else(|_| other()),
        Type::TIME => chrono::NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
            .map(SqlValue::Time)
            .unwrap_or_else(|_| other()),
        Type::TIMESTAMP => chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
            .map(SqlValue::Timestamp)
            .unwrap_or_else(|_| other()),
        Type::TIMESTAMPTZ => chrono::DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%#z")
            .map(|ts| SqlValue::TimestampTz(ts.with_timezone(&chrono::Utc)))
            .unwrap_or_else(|_| other()),
        Type::BYTEA => text
            .strip_prefix("\\x")
            .and_then(decode_hex)
            .map(SqlValue::Bytes)
            .unwrap_or_else(other),
        Type::JSON | Type::JSONB => serde_json::from_str(text)
            .map(SqlValue::Json)
            .unwrap_or_else(|_| other()),
        _ => other(),
    }
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| hex.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
        .collect()
}
