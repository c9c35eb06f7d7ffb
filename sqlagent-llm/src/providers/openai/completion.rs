//! OpenAI completion provider implementation

use super::client::OpenAIClient;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, Message};
use crate::providers::empty_response;
use crate::{CompletionProvider, CompletionRequest};
use async_trait::async_trait;
use sqlagent_core::AgentResult;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Completion provider backed by the chat-completions endpoint.
#[derive(Debug)]
pub struct OpenAICompletionProvider {
    client: OpenAIClient,
    model: String,
}

impl OpenAICompletionProvider {
    /// Create a new provider.
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `model` - Model name (e.g., "gpt-4o-mini", "gpt-4o")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_client(OpenAIClient::new(api_key), model)
    }

    pub fn with_client(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Create provider with default gpt-4o-mini model.
    pub fn with_default_model(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_MODEL)
    }

    fn build_request(&self, request: CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(request.prompt)],
            max_tokens: None,
            temperature: Some(request.temperature),
        }
    }
}

/// Content of the first choice, or an error when there is none.
fn first_content(response: ChatCompletionResponse) -> AgentResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| empty_response("openai"))
}

#[async_trait]
impl CompletionProvider for OpenAICompletionProvider {
    fn provider_id(&self) -> &str {
        "openai"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> AgentResult<String> {
        let body = self.build_request(request);
        let response: ChatCompletionResponse =
            self.client.request("chat/completions", body).await?;
        if let Some(usage) = &response.usage {
            tracing::debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_tokens,
                total_tokens = usage.total_tokens,
                "Completion received"
            );
        }
        first_content(response)
    }
}
