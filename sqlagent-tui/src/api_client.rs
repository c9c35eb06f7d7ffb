//! REST client for the sqlagent API.

use crate::config::TuiConfig;
use reqwest::Url;
use sqlagent_api::error::{ApiError as ApiServerError, ErrorCode};
use sqlagent_api::types::{
    DatabasesResponse, ExecuteSqlRequest, ExecuteSqlResponse, GenerateSqlRequest,
    GenerateSqlResponse, SchemaResponse, TablesResponse,
};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{code}: {message}")]
    Api { code: ErrorCode, message: String },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Config error: {0}")]
    Config(String),
}

#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: Url,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(config.api_base_url.trim()).map_err(|e| {
            ApiClientError::Config(format!("invalid api_base_url '{}': {}", config.api_base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiClientError::Config(format!(
                "api_base_url '{}' cannot carry a path",
                base_url
            )));
        }
        Ok(Self { client, base_url })
    }

    pub async fn list_databases(&self) -> Result<Vec<String>, ApiClientError> {
        let response: DatabasesResponse = self.get_json(&["api", "databases"]).await?;
        Ok(response.databases)
    }

    pub async fn list_tables(&self, database: &str) -> Result<Vec<String>, ApiClientError> {
        let response: TablesResponse = self
            .get_json(&["api", "databases", database, "tables"])
            .await?;
        Ok(response.tables)
    }

    pub async fn table_schema(
        &self,
        database: &str,
        table: &str,
    ) -> Result<SchemaResponse, ApiClientError> {
        self.get_json(&["api", "databases", database, "tables", table, "schema"])
            .await
    }

    pub async fn generate_sql(
        &self,
        question: &str,
        schema_str: &str,
    ) -> Result<String, ApiClientError> {
        let body = GenerateSqlRequest {
            question: Some(question.to_string()),
            schema_str: Some(schema_str.to_string()),
        };
        let response: GenerateSqlResponse = self.post_json(&["api", "generate-sql"], &body).await?;
        Ok(response.sql)
    }

    pub async fn execute_sql(
        &self,
        database: &str,
        sql: &str,
    ) -> Result<ExecuteSqlResponse, ApiClientError> {
        let body = ExecuteSqlRequest {
            database: Some(database.to_string()),
            sql: Some(sql.to_string()),
        };
        self.post_json(&["api", "execute-sql"], &body).await
    }

    /// Build an endpoint URL, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiClientError::Config(format!("api_base_url '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T>(&self, segments: &[&str]) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let response = self.client.get(url).send().await?;
        parse_response(response).await
    }

    async fn post_json<T, B>(&self, segments: &[&str], body: &B) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let response = self.client.post(url).json(body).send().await?;
        parse_response(response).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        return Ok(serde_json::from_str(&text)?);
    }
    Err(error_from_body(status.as_u16(), &text))
}

/// Decode the server's error envelope, falling back to the raw body.
pub fn error_from_body(status: u16, body: &str) -> ApiClientError {
    match serde_json::from_str::<ApiServerError>(body) {
        Ok(api_error) => ApiClientError::Api {
            code: api_error.code,
            message: api_error.error,
        },
        Err(_) => ApiClientError::InvalidResponse(format!("HTTP {}: {}", status, body.trim())),
    }
}
