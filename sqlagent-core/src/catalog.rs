//! Catalog listing, schema description and statement execution.
//!
//! Every function acquires one connection from the provider, performs a
//! single operation and closes the connection before returning, whether the
//! operation succeeded or not.

use crate::connection::{ConnectionProvider, SqlConnection};
use crate::error::{AgentError, AgentResult, DbError};
use crate::result::QueryResult;
use crate::schema::SchemaDescription;

/// List every database the credential can see.
pub async fn list_databases(provider: &dyn ConnectionProvider) -> AgentResult<Vec<String>> {
    let mut conn = provider.connect(None).await?;
    let outcome = conn.databases().await;
    release(conn, outcome).await
}

/// List the tables of one database.
pub async fn list_tables(
    provider: &dyn ConnectionProvider,
    database: &str,
) -> AgentResult<Vec<String>> {
    require("database", database)?;
    let mut conn = provider.connect(Some(database)).await?;
    let outcome = conn.tables().await;
    release(conn, outcome).await
}

/// Describe one table's columns.
pub async fn describe_table(
    provider: &dyn ConnectionProvider,
    database: &str,
    table: &str,
) -> AgentResult<SchemaDescription> {
    require("database", database)?;
    require("table", table)?;
    let mut conn = provider.connect(Some(database)).await?;
    let outcome = conn.describe(table).await;
    let columns = release(conn, outcome).await?;
    if columns.is_empty() {
        return Err(DbError::TableNotFound {
            database: database.to_string(),
            table: table.to_string(),
        }
        .into());
    }
    Ok(SchemaDescription::new(table, columns))
}

/// Run `sql` against `database` and normalize the rows.
///
/// The statement is executed verbatim with the privileges of the configured
/// credential. It is never retried.
pub async fn execute(
    provider: &dyn ConnectionProvider,
    database: &str,
    sql: &str,
) -> AgentResult<QueryResult> {
    require("database", database)?;
    require("sql", sql)?;
    tracing::debug!(database, sql, "Executing statement");
    let mut conn = provider.connect(Some(database)).await?;
    let outcome = conn.run(sql).await;
    let set = release(conn, outcome).await?;
    let result = QueryResult::from_result_set(set);
    tracing::debug!(database, row_count = result.row_count, "Statement finished");
    Ok(result)
}

async fn release<T>(conn: Box<dyn SqlConnection>, outcome: AgentResult<T>) -> AgentResult<T> {
    conn.close().await;
    if let Err(e) = &outcome {
        tracing::warn!(error = %e, "Database operation failed");
    }
    outcome
}

fn require(field: &str, value: &str) -> AgentResult<()> {
    if value.trim().is_empty() {
        return Err(AgentError::missing(field));
    }
    Ok(())
}
