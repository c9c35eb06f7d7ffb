//! Query results, raw and normalized.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::value::SqlValue;

/// Column names plus positional rows, as produced by a connection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self { columns, rows }
    }
}

/// Normalized rows keyed by column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, JsonValue>>,
    pub row_count: usize,
}

impl QueryResult {
    /// Pair every cell with its column and normalize it.
    ///
    /// Rows shorter than the column list simply omit the missing keys;
    /// repeated column names keep the last value.
    pub fn from_result_set(set: ResultSet) -> Self {
        let ResultSet { columns, rows } = set;
        let rows: Vec<Map<String, JsonValue>> = rows
            .into_iter()
            .map(|row| {
                columns
                    .iter()
                    .cloned()
                    .zip(row.into_iter().map(SqlValue::normalize))
                    .collect()
            })
            .collect();
        let row_count = rows.len();
        Self {
            columns,
            rows,
            row_count,
        }
    }
}

impl From<ResultSet> for QueryResult {
    fn from(set: ResultSet) -> Self {
        Self::from_result_set(set)
    }
}
