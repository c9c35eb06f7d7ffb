//! Translation and execution REST API Routes

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{
    present, ExecuteSqlRequest, ExecuteSqlResponse, GenerateSqlRequest, GenerateSqlResponse,
};

/// POST /api/generate-sql - Translate a question into SQL
///
/// A field that is absent, empty or whitespace-only is reported as missing
/// (400); the translator would reject such input without calling the model.
#[utoipa::path(
    post,
    path = "/api/generate-sql",
    tag = "Query",
    request_body = GenerateSqlRequest,
    responses(
        (status = 200, description = "Generated statement", body = GenerateSqlResponse),
        (status = 400, description = "Missing or blank question or schema_str", body = ApiError),
        (status = 500, description = "Completion service failed or body unreadable", body = ApiError),
    ),
)]
pub async fn generate_sql(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateSqlRequest>, JsonRejection>,
) -> ApiResult<Json<GenerateSqlResponse>> {
    let Json(req) = payload?;
    let (Some(question), Some(schema_str)) = (present(req.question), present(req.schema_str))
    else {
        return Err(ApiError::missing_fields("question or schema_str"));
    };

    tracing::info!(question = %question, "Generating SQL");
    let sql = state.translator.translate(&question, &schema_str).await?;
    Ok(Json(GenerateSqlResponse { success: true, sql }))
}

/// POST /api/execute-sql - Run a statement against a database
///
/// Blank `database` or `sql` counts as missing (400) and no connection is
/// opened.
#[utoipa::path(
    post,
    path = "/api/execute-sql",
    tag = "Query",
    request_body = ExecuteSqlRequest,
    responses(
        (status = 200, description = "Columns and rows", body = ExecuteSqlResponse),
        (status = 400, description = "Missing or blank database or sql", body = ApiError),
        (status = 500, description = "Statement failed or body unreadable", body = ApiError),
    ),
)]
pub async fn execute_sql(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExecuteSqlRequest>, JsonRejection>,
) -> ApiResult<Json<ExecuteSqlResponse>> {
    let Json(req) = payload?;
    let (Some(database), Some(sql)) = (present(req.database), present(req.sql)) else {
        return Err(ApiError::missing_fields("database or sql"));
    };

    tracing::info!(%database, "Executing SQL");
    let result = sqlagent_core::execute(state.db.as_ref(), &database, &sql).await?;
    Ok(Json(ExecuteSqlResponse::from(result)))
}
