//! Translation pipeline tests against a scripted completion provider.

use std::sync::Arc;

use sqlagent_core::{AgentError, ErrorKind, LlmError};
use sqlagent_llm::{QueryTranslator, SqlDialect};
use sqlagent_test_utils::fixtures::{orders_schema, COUNT_ORDERS_SQL};
use sqlagent_test_utils::MockCompletionProvider;

fn translator_with(mock: &Arc<MockCompletionProvider>) -> QueryTranslator {
    QueryTranslator::new(mock.clone(), SqlDialect::PostgreSql)
}

#[tokio::test]
async fn test_unfenced_response_passes_through() -> Result<(), AgentError> {
    let mock = Arc::new(MockCompletionProvider::new(COUNT_ORDERS_SQL));
    let translator = translator_with(&mock);
    let schema = orders_schema().render();

    let sql = translator
        .translate("how many rows are in orders", &schema)
        .await?;

    assert_eq!(sql, "SELECT COUNT(*) FROM orders;");
    assert_eq!(mock.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_prompt_embeds_schema_and_question() -> Result<(), AgentError> {
    let mock = Arc::new(MockCompletionProvider::new("SELECT 1"));
    let translator = translator_with(&mock).with_temperature(0.2);
    let schema = orders_schema().render();

    translator.translate("total revenue by status", &schema).await?;

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    let prompt = &requests[0].prompt;
    assert!(prompt.starts_with("You are a PostgreSQL expert."));
    assert!(prompt.contains("SELECT query"));
    assert!(prompt.contains(&format!("SCHEMA:\n{}\n", schema)));
    assert!(prompt.contains("USER QUESTION:\ntotal revenue by status"));
    assert!((requests[0].temperature - 0.2).abs() < f32::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_fenced_response_is_stripped() -> Result<(), AgentError> {
    let mock = Arc::new(MockCompletionProvider::new(
        "\n```sql\nSELECT status, SUM(total)\nFROM orders\nGROUP BY status;\n```\n",
    ));
    let translator = translator_with(&mock);

    let sql = translator
        .translate("revenue per status", &orders_schema().render())
        .await?;

    assert_eq!(sql, "SELECT status, SUM(total)\nFROM orders\nGROUP BY status;");
    Ok(())
}

#[tokio::test]
async fn test_empty_inputs_never_reach_provider() {
    let mock = Arc::new(MockCompletionProvider::new("SELECT 1"));
    let translator = translator_with(&mock);

    let err = translator.translate("", "Table: t").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = translator.translate("how many?", "").await.unwrap_err();
    assert_eq!(err, AgentError::missing("schema_str"));

    let err = translator.translate(" \n ", "Table: t").await.unwrap_err();
    assert_eq!(err, AgentError::missing("question"));

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_service_failure_is_translation_error() {
    let mock = Arc::new(MockCompletionProvider::failing(LlmError::RateLimited {
        provider: "mock".to_string(),
        retry_after_ms: 1000,
    }));
    let translator = translator_with(&mock);

    let err = translator
        .translate("how many orders?", "Table: orders")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TranslationService);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_no_retry_after_failure() {
    let mock = Arc::new(MockCompletionProvider::new("SELECT 1"));
    mock.push(Err(LlmError::EmptyResponse {
        provider: "mock".to_string(),
    }
    .into()));
    let translator = translator_with(&mock);

    assert!(translator.translate("q", "Table: t").await.is_err());
    assert_eq!(mock.call_count(), 1);

    // The next call is a fresh request.
    assert_eq!(translator.translate("q", "Table: t").await, Ok("SELECT 1".to_string()));
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn test_blank_completion_is_returned_as_is() -> Result<(), AgentError> {
    let mock = Arc::new(MockCompletionProvider::new("```sql\n```"));
    let translator = translator_with(&mock);

    let sql = translator.translate("anything", "Table: t").await?;
    assert_eq!(sql, "");
    Ok(())
}

#[tokio::test]
async fn test_dialect_changes_prompt() -> Result<(), AgentError> {
    let mock = Arc::new(MockCompletionProvider::new("SELECT 1"));
    let translator = QueryTranslator::new(mock.clone(), SqlDialect::MySql);

    translator.translate("q", "Table: t").await?;

    assert!(mock.requests()[0].prompt.starts_with("You are a MySQL expert."));
    assert_eq!(translator.model_id(), Some("mock-model"));
    Ok(())
}
