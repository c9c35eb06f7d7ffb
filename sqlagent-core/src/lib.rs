//! sqlagent Core - schema, values and catalog access
//!
//! Shared building blocks for the query assistant: the schema description
//! handed to the translator, cell normalization, the error taxonomy and the
//! scoped-connection orchestration used by both front ends.

pub mod catalog;
pub mod connection;
pub mod error;
pub mod result;
pub mod schema;
pub mod value;

pub use catalog::{describe_table, execute, list_databases, list_tables};
pub use connection::{ConnectionProvider, SqlConnection};
pub use error::{AgentError, AgentResult, DbError, ErrorKind, LlmError, ValidationError};
pub use result::{QueryResult, ResultSet};
pub use schema::{ColumnInfo, SchemaDescription};
pub use value::SqlValue;
