//! sqlagent API Server Entry Point
//!
//! Reads configuration from the environment, builds the shared translator
//! and connection provider, and starts the Axum HTTP server.

use std::sync::Arc;

use axum::Router;
use sqlagent_api::telemetry::init_tracing;
use sqlagent_api::{
    create_api_router, ApiConfig, ApiError, ApiResult, AppState, DbConfig, PgConnectionProvider,
};
use sqlagent_llm::{QueryTranslator, TranslatorConfig};

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_tracing()?;

    let api_config = ApiConfig::from_env()?;
    let db_config = DbConfig::from_env();
    let translator_config = TranslatorConfig::from_env()?;

    tracing::info!(db = ?db_config, translator = ?translator_config, "Configuration loaded");

    let state = AppState::new(
        Arc::new(PgConnectionProvider::new(db_config)),
        QueryTranslator::from_config(&translator_config),
    );
    let app: Router = create_api_router(state, &api_config);

    let addr = api_config.bind_addr()?;
    tracing::info!(%addr, "Starting sqlagent API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
