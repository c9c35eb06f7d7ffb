//! REST API Routes
//!
//! - Catalog listing and table description under /api/databases
//! - Translation at /api/generate-sql, execution at /api/execute-sql
//! - Liveness at /api/health
//! - OpenAPI spec at /openapi.json

pub mod catalog;
pub mod health;
pub mod query;

use axum::{
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Build the complete router with tracing and CORS layers applied.
pub fn create_api_router(state: AppState, config: &ApiConfig) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/databases", get(catalog::list_databases))
        .route("/api/databases/:database/tables", get(catalog::list_tables))
        .route(
            "/api/databases/:database/tables/:table/schema",
            get(catalog::table_schema),
        )
        .route("/api/generate-sql", post(query::generate_sql))
        .route("/api/execute-sql", post(query::execute_sql))
        .route("/api/health", get(health::health))
        .route("/openapi.json", get(openapi_json))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config))
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// With no configured origins every origin is allowed.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(config.cors_max_age());

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!("CORS: allowing origins: {:?}", config.cors_origins);
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
