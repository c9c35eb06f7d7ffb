//! Request and response bodies for the REST endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use sqlagent_core::{ColumnInfo, QueryResult, SchemaDescription};

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DatabasesResponse {
    pub success: bool,
    pub databases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TablesResponse {
    pub success: bool,
    pub tables: Vec<String>,
}

/// Column rows plus the text rendering fed to the translator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SchemaResponse {
    pub success: bool,
    pub schema: Vec<ColumnInfo>,
    pub schema_str: String,
}

impl From<SchemaDescription> for SchemaResponse {
    fn from(description: SchemaDescription) -> Self {
        let schema_str = description.render();
        Self {
            success: true,
            schema: description.columns,
            schema_str,
        }
    }
}

// ============================================================================
// TRANSLATION
// ============================================================================

/// Fields are optional so that an absent field yields the 400 envelope
/// instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GenerateSqlRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub schema_str: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GenerateSqlResponse {
    pub success: bool,
    pub sql: String,
}

// ============================================================================
// EXECUTION
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExecuteSqlRequest {
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub sql: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExecuteSqlResponse {
    pub success: bool,
    pub columns: Vec<String>,
    /// One object per row, keyed by column name
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub rows: Vec<Map<String, JsonValue>>,
    pub row_count: usize,
}

impl From<QueryResult> for ExecuteSqlResponse {
    fn from(result: QueryResult) -> Self {
        Self {
            success: true,
            columns: result.columns,
            rows: result.rows,
            row_count: result.row_count,
        }
    }
}

// ============================================================================
// HEALTH
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub message: String,
}

/// Trimmed-empty strings count as absent, so `"  "` is a missing field.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
