//! sqlagent API - HTTP front end
//!
//! Axum routes over the catalog, translation and execution operations, the
//! PostgreSQL connection provider and process configuration.

pub mod config;
pub mod db;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod types;

pub use config::ApiConfig;
pub use db::{DbConfig, PgConnectionProvider};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::AppState;
