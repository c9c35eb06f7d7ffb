//! Health Check Endpoint
//!
//! Liveness only; it does not touch the database or the completion service.

use axum::Json;

use crate::types::{HealthResponse, HealthStatus};

/// GET /api/health - Process liveness check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse),
    ),
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        message: "SQL AI Agent API is running".to_string(),
    })
}
