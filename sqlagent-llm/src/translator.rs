//! Question-to-SQL translation.

use std::sync::Arc;

use sqlagent_core::{AgentError, AgentResult, LlmError, ValidationError};

use crate::prompt::{build_prompt, SqlDialect};
use crate::providers::openai::client::DEFAULT_BASE_URL;
use crate::providers::openai::completion::DEFAULT_MODEL;
use crate::providers::{OpenAIClient, OpenAICompletionProvider};
use crate::sanitize::clean_sql;
use crate::{CompletionProvider, CompletionRequest};

pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Translator settings read from the environment.
#[derive(Clone, PartialEq)]
pub struct TranslatorConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub dialect: SqlDialect,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            dialect: SqlDialect::default(),
        }
    }
}

impl TranslatorConfig {
    /// Read `OPENAI_API_KEY`, `SQLAGENT_OPENAI_MODEL`,
    /// `SQLAGENT_OPENAI_BASE_URL`, `SQLAGENT_LLM_TEMPERATURE` and
    /// `SQLAGENT_SQL_DIALECT`.
    pub fn from_env() -> AgentResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> AgentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let temperature = match non_empty("SQLAGENT_LLM_TEMPERATURE") {
            Some(raw) => {
                let value: f32 = raw.trim().parse().map_err(|_| {
                    invalid("SQLAGENT_LLM_TEMPERATURE", format!("not a number: {}", raw))
                })?;
                if !(0.0..=2.0).contains(&value) {
                    return Err(invalid(
                        "SQLAGENT_LLM_TEMPERATURE",
                        format!("must be between 0 and 2, got {}", value),
                    ));
                }
                value
            }
            None => defaults.temperature,
        };

        let dialect = match non_empty("SQLAGENT_SQL_DIALECT") {
            Some(raw) => raw
                .parse()
                .map_err(|reason: String| invalid("SQLAGENT_SQL_DIALECT", reason))?,
            None => defaults.dialect,
        };

        Ok(Self {
            api_key: non_empty("OPENAI_API_KEY"),
            model: non_empty("SQLAGENT_OPENAI_MODEL").unwrap_or(defaults.model),
            base_url: non_empty("SQLAGENT_OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            temperature,
            dialect,
        })
    }
}

impl std::fmt::Debug for TranslatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("dialect", &self.dialect)
            .finish()
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> AgentError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
    .into()
}

/// Turns a natural-language question plus schema text into one SQL statement.
///
/// Built once at startup and shared between requests. A translator without
/// a provider still validates input but fails every translation with
/// [`LlmError::ProviderNotConfigured`].
#[derive(Clone)]
pub struct QueryTranslator {
    provider: Option<Arc<dyn CompletionProvider>>,
    dialect: SqlDialect,
    temperature: f32,
}

impl QueryTranslator {
    pub fn new(provider: Arc<dyn CompletionProvider>, dialect: SqlDialect) -> Self {
        Self {
            provider: Some(provider),
            dialect,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// A translator with no completion service behind it.
    pub fn unconfigured(dialect: SqlDialect) -> Self {
        Self {
            provider: None,
            dialect,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Build the OpenAI-backed translator described by `config`.
    pub fn from_config(config: &TranslatorConfig) -> Self {
        let translator = match &config.api_key {
            Some(key) => {
                let client = OpenAIClient::new(key.clone()).with_base_url(config.base_url.clone());
                let provider = OpenAICompletionProvider::with_client(client, config.model.clone());
                Self::new(Arc::new(provider), config.dialect)
            }
            None => {
                tracing::warn!("OPENAI_API_KEY not set, SQL generation is disabled");
                Self::unconfigured(config.dialect)
            }
        };
        translator.with_temperature(config.temperature)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn model_id(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.model_id())
    }

    /// Translate `question` against `schema_text`.
    ///
    /// Both inputs must contain something other than whitespace; that is
    /// checked before the provider is contacted. The returned statement is
    /// not validated in any way and may be empty.
    pub async fn translate(&self, question: &str, schema_text: &str) -> AgentResult<String> {
        if question.trim().is_empty() {
            return Err(AgentError::missing("question"));
        }
        if schema_text.trim().is_empty() {
            return Err(AgentError::missing("schema_str"));
        }
        let provider = self
            .provider
            .as_ref()
            .ok_or(AgentError::Llm(LlmError::ProviderNotConfigured))?;

        let prompt = build_prompt(self.dialect, schema_text, question);
        let raw = provider
            .complete(CompletionRequest::new(prompt, self.temperature))
            .await?;
        let sql = clean_sql(&raw);
        tracing::debug!(model = provider.model_id(), sql = %sql, "Question translated");
        Ok(sql)
    }
}

impl std::fmt::Debug for QueryTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryTranslator")
            .field("model", &self.model_id())
            .field("dialect", &self.dialect)
            .field("temperature", &self.temperature)
            .finish()
    }
}
