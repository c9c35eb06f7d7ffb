//! Connection traits implemented by database drivers.
//!
//! A provider hands out a fresh connection per call; callers own it for
//! exactly one operation and must `close` it afterwards. Nothing is pooled.

use async_trait::async_trait;

use crate::error::AgentResult;
use crate::result::ResultSet;
use crate::schema::ColumnInfo;

/// A live connection to one database.
#[async_trait]
pub trait SqlConnection: Send {
    /// Names of all databases visible to the configured credential.
    async fn databases(&mut self) -> AgentResult<Vec<String>>;

    /// Names of the tables in the connected database.
    async fn tables(&mut self) -> AgentResult<Vec<String>>;

    /// Column metadata for one table, in declaration order.
    async fn describe(&mut self, table: &str) -> AgentResult<Vec<ColumnInfo>>;

    /// Run a single statement and fetch every row.
    async fn run(&mut self, sql: &str) -> AgentResult<ResultSet>;

    /// Release the connection.
    async fn close(self: Box<Self>);
}

/// Factory for scoped connections.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Open a connection to `database`, or to the server's default
    /// database when `None`.
    async fn connect(&self, database: Option<&str>) -> AgentResult<Box<dyn SqlConnection>>;
}
