//! Prompt construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SQL dialect the model is asked to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    PostgreSql,
    MySql,
    Sqlite,
    Generic,
}

impl SqlDialect {
    /// Name as it appears in the prompt.
    pub fn display_name(&self) -> &'static str {
        match self {
            SqlDialect::PostgreSql => "PostgreSQL",
            SqlDialect::MySql => "MySQL",
            SqlDialect::Sqlite => "SQLite",
            SqlDialect::Generic => "SQL",
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(SqlDialect::PostgreSql),
            "mysql" | "mariadb" => Ok(SqlDialect::MySql),
            "sqlite" => Ok(SqlDialect::Sqlite),
            "sql" | "generic" | "ansi" => Ok(SqlDialect::Generic),
            other => Err(format!("unknown SQL dialect: {}", other)),
        }
    }
}

/// Build the single instruction sent to the model.
///
/// Schema text and question are embedded verbatim.
pub fn build_prompt(dialect: SqlDialect, schema_text: &str, question: &str) -> String {
    format!(
        "You are a {dialect} expert.\n\
         Convert the following user question into a valid {dialect} SELECT query.\n\
         Only return the SQL query (no explanation).\n\
         \n\
         SCHEMA:\n\
         {schema_text}\n\
         \n\
         USER QUESTION:\n\
         {question}\n"
    )
}
