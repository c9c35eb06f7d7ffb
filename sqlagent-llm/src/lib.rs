//! sqlagent LLM - question-to-SQL translation
//!
//! Provider-agnostic completion trait plus the pieces of the translation
//! pipeline: prompt construction, fence stripping and the translator that
//! ties them together.

pub mod prompt;
pub mod providers;
pub mod sanitize;
pub mod translator;

use async_trait::async_trait;
use sqlagent_core::AgentResult;

pub use prompt::{build_prompt, SqlDialect};
pub use providers::{OpenAIClient, OpenAICompletionProvider};
pub use sanitize::clean_sql;
pub use translator::{QueryTranslator, TranslatorConfig};

// ============================================================================
// COMPLETION PROVIDER TRAIT
// ============================================================================

/// A single-turn completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// The whole instruction, sent as one user message.
    pub prompt: String,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
        }
    }
}

/// Trait for hosted completion services.
/// Implementations must be thread-safe (Send + Sync).
///
/// # Example
/// ```ignore
/// let provider = OpenAICompletionProvider::new(api_key, "gpt-4o-mini");
/// let text = provider.complete(CompletionRequest::new(prompt, 0.1)).await?;
/// ```
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short provider name used in error messages.
    fn provider_id(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model_id(&self) -> &str;

    /// Send one request and return the raw text of the first completion.
    ///
    /// # Returns
    /// * `Ok(String)` - Completion text, untrimmed
    /// * `Err(AgentError::Llm)` - If the service fails or answers with nothing
    async fn complete(&self, request: CompletionRequest) -> AgentResult<String>;
}
