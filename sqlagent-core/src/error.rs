//! Error types for sqlagent operations

use thiserror::Error;

/// Input validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Hosted completion service errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("No completion provider configured")]
    ProviderNotConfigured,

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: i32,
        message: String,
    },

    #[error("Rate limited by {provider}, retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: i64,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Empty completion from {provider}")]
    EmptyResponse { provider: String },
}

/// Database driver errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DbError {
    #[error("Cannot connect to {target}: {reason}")]
    Connection { target: String, reason: String },

    #[error("Statement failed: {reason}")]
    Execution { reason: String },

    #[error("Table {table} not found in database {database}")]
    TableNotFound { database: String, table: String },
}

/// Coarse error category surfaced to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    TranslationService,
    Execution,
    Connection,
}

/// Master error type for all sqlagent errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Translation error: {0}")]
    Llm(#[from] LlmError),

    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

impl AgentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AgentError::Validation(_) => ErrorKind::InvalidInput,
            AgentError::Llm(_) => ErrorKind::TranslationService,
            AgentError::Db(DbError::Connection { .. }) => ErrorKind::Connection,
            AgentError::Db(_) => ErrorKind::Execution,
        }
    }

    /// Shorthand for a missing required field.
    pub fn missing(field: impl Into<String>) -> Self {
        AgentError::Validation(ValidationError::RequiredFieldMissing {
            field: field.into(),
        })
    }

    /// Shorthand for a failed statement.
    pub fn execution(reason: impl Into<String>) -> Self {
        AgentError::Db(DbError::Execution {
            reason: reason.into(),
        })
    }

    /// Shorthand for an unreachable database or service.
    pub fn connection(target: impl Into<String>, reason: impl Into<String>) -> Self {
        AgentError::Db(DbError::Connection {
            target: target.into(),
            reason: reason.into(),
        })
    }
}

/// Result type alias for sqlagent operations.
pub type AgentResult<T> = Result<T, AgentError>;

// =============================================================================
// TESTS
// =============================================================================
