//! Catalog REST API Routes
//!
//! Database and table listing plus table description. Each handler opens
//! exactly one connection.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{DatabasesResponse, SchemaResponse, TablesResponse};

/// GET /api/databases - List databases visible to the configured credential
#[utoipa::path(
    get,
    path = "/api/databases",
    tag = "Catalog",
    responses(
        (status = 200, description = "Database names", body = DatabasesResponse),
        (status = 500, description = "Database unreachable", body = ApiError),
    ),
)]
pub async fn list_databases(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DatabasesResponse>> {
    let databases = sqlagent_core::list_databases(state.db.as_ref()).await?;
    Ok(Json(DatabasesResponse {
        success: true,
        databases,
    }))
}

/// GET /api/databases/{database}/tables - List tables of one database
#[utoipa::path(
    get,
    path = "/api/databases/{database}/tables",
    tag = "Catalog",
    params(
        ("database" = String, Path, description = "Database name")
    ),
    responses(
        (status = 200, description = "Table names", body = TablesResponse),
        (status = 500, description = "Listing failed", body = ApiError),
    ),
)]
pub async fn list_tables(
    State(state): State<Arc<AppState>>,
    Path(database): Path<String>,
) -> ApiResult<Json<TablesResponse>> {
    let tables = sqlagent_core::list_tables(state.db.as_ref(), &database).await?;
    Ok(Json(TablesResponse {
        success: true,
        tables,
    }))
}

/// GET /api/databases/{database}/tables/{table}/schema - Describe a table
#[utoipa::path(
    get,
    path = "/api/databases/{database}/tables/{table}/schema",
    tag = "Catalog",
    params(
        ("database" = String, Path, description = "Database name"),
        ("table" = String, Path, description = "Table name")
    ),
    responses(
        (status = 200, description = "Columns and prompt rendering", body = SchemaResponse),
        (status = 500, description = "Table missing or description failed", body = ApiError),
    ),
)]
pub async fn table_schema(
    State(state): State<Arc<AppState>>,
    Path((database, table)): Path<(String, String)>,
) -> ApiResult<Json<SchemaResponse>> {
    let description = sqlagent_core::describe_table(state.db.as_ref(), &database, &table).await?;
    Ok(Json(SchemaResponse::from(description)))
}
