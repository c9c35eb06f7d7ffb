//! Completion provider implementations
//!
//! Concrete implementations of [`CompletionProvider`](crate::CompletionProvider)
//! plus the error constructors they share.

pub mod openai;

pub use openai::{OpenAIClient, OpenAICompletionProvider};

use sqlagent_core::{AgentError, LlmError};

pub(crate) fn request_failed(provider: &str, status: i32, message: impl Into<String>) -> AgentError {
    LlmError::RequestFailed {
        provider: provider.to_string(),
        status,
        message: message.into(),
    }
    .into()
}

pub(crate) fn rate_limited(provider: &str, retry_after_ms: i64) -> AgentError {
    LlmError::RateLimited {
        provider: provider.to_string(),
        retry_after_ms,
    }
    .into()
}

pub(crate) fn invalid_response(provider: &str, reason: impl Into<String>) -> AgentError {
    LlmError::InvalidResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    }
    .into()
}

pub(crate) fn empty_response(provider: &str) -> AgentError {
    LlmError::EmptyResponse {
        provider: provider.to_string(),
    }
    .into()
}
