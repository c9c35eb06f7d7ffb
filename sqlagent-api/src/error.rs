//! Error Types for the sqlagent API
//!
//! This module defines error handling for the API layer, including:
//! - ApiError struct for the JSON error envelope
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//!
//! Missing required fields map to 400; every other failure, an unreadable
//! request body included, is reported as 500 with the underlying message.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlagent_core::{AgentError, DbError, LlmError, ValidationError};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Required field is missing or blank
    MissingField,

    /// Field value is present but unusable
    InvalidInput,

    // ========================================================================
    // Server Errors (500)
    // ========================================================================
    /// Request body could not be read as the endpoint's JSON payload
    InvalidJson,

    /// The completion service failed or is not configured
    TranslationFailed,

    /// The database rejected the statement
    ExecutionFailed,

    /// The database server could not be reached
    ConnectionFailed,

    /// Anything else
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::MissingField | ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,

            ErrorCode::InvalidJson
            | ErrorCode::TranslationFailed
            | ErrorCode::ExecutionFailed
            | ErrorCode::ConnectionFailed
            | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Error envelope returned by every endpoint on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiError {
    /// Always false
    pub success: bool,

    /// Human-readable error message
    pub error: String,

    /// Error code categorizing the error
    pub code: ErrorCode,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            code,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    /// One of several required body fields is absent, e.g. `"question or schema_str"`.
    pub fn missing_fields(fields: &str) -> Self {
        Self::new(ErrorCode::MissingField, format!("Missing {}", fields))
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.error)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Implement IntoResponse for ApiError to enable automatic error handling in Axum.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Convert domain errors, keeping their message.
impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        let code = match &err {
            AgentError::Validation(ValidationError::RequiredFieldMissing { .. }) => {
                ErrorCode::MissingField
            }
            AgentError::Validation(ValidationError::InvalidValue { .. }) => ErrorCode::InvalidInput,
            AgentError::Llm(LlmError::ProviderNotConfigured)
            | AgentError::Llm(LlmError::RequestFailed { .. })
            | AgentError::Llm(LlmError::RateLimited { .. })
            | AgentError::Llm(LlmError::InvalidResponse { .. })
            | AgentError::Llm(LlmError::EmptyResponse { .. }) => ErrorCode::TranslationFailed,
            AgentError::Db(DbError::Connection { .. }) => ErrorCode::ConnectionFailed,
            AgentError::Db(DbError::Execution { .. })
            | AgentError::Db(DbError::TableNotFound { .. }) => ErrorCode::ExecutionFailed,
        };
        if code.status_code().is_server_error() {
            tracing::error!(error = %err, "Request failed");
        }
        ApiError::new(code, err.to_string())
    }
}

/// Convert from JsonRejection so malformed bodies get the error envelope.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::error!(error = %rejection.body_text(), "Unreadable request body");
        ApiError::new(ErrorCode::InvalidJson, rejection.body_text())
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
