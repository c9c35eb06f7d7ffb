//! Scoped-connection behavior of the catalog and executor functions.

use sqlagent_core::{
    describe_table, execute, list_databases, list_tables, AgentError, DbError, ErrorKind,
    ValidationError,
};
use sqlagent_test_utils::fixtures::{shop_provider, COUNT_ORDERS_SQL};
use sqlagent_test_utils::FakeConnectionProvider;

#[tokio::test]
async fn test_list_databases_uses_default_database() -> Result<(), AgentError> {
    let provider = shop_provider();
    let databases = list_databases(&provider).await?;

    assert_eq!(databases, vec!["postgres".to_string(), "shop".to_string()]);
    assert_eq!(provider.connected_databases(), vec![None]);
    assert_eq!(provider.open_connections(), 0);
    Ok(())
}

#[tokio::test]
async fn test_list_tables_closes_connection() -> Result<(), AgentError> {
    let provider = shop_provider();
    let tables = list_tables(&provider, "shop").await?;

    assert_eq!(tables, vec!["orders".to_string(), "customers".to_string()]);
    assert_eq!(provider.connected_databases(), vec![Some("shop".to_string())]);
    assert_eq!(provider.close_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_list_tables_unknown_database_still_closes() {
    let provider = shop_provider();
    let err = list_tables(&provider, "warehouse").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Execution);
    assert_eq!(provider.connect_count(), 1);
    assert_eq!(provider.open_connections(), 0);
}

#[tokio::test]
async fn test_describe_table_renders_schema() -> Result<(), AgentError> {
    let provider = shop_provider();
    let schema = describe_table(&provider, "shop", "customers").await?;

    assert_eq!(
        schema.render(),
        "Table: customers\nColumns:\nid (integer)\nname (character varying(50))"
    );
    assert_eq!(provider.open_connections(), 0);
    Ok(())
}

#[tokio::test]
async fn test_describe_missing_table() {
    let provider = shop_provider();
    let err = describe_table(&provider, "shop", "ghosts").await.unwrap_err();

    assert_eq!(
        err,
        AgentError::Db(DbError::TableNotFound {
            database: "shop".to_string(),
            table: "ghosts".to_string(),
        })
    );
    assert_eq!(provider.close_count(), 1);
}

#[tokio::test]
async fn test_execute_count_scenario() -> Result<(), AgentError> {
    let provider = shop_provider();
    let result = execute(&provider, "shop", COUNT_ORDERS_SQL).await?;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        serde_json::json!({
            "columns": ["COUNT(*)"],
            "rows": [{"COUNT(*)": 42}],
            "row_count": 1
        })
    );
    assert_eq!(provider.statements(), vec![COUNT_ORDERS_SQL.to_string()]);
    assert_eq!(provider.open_connections(), 0);
    Ok(())
}

#[tokio::test]
async fn test_execute_malformed_sql_releases_connection() {
    let provider = shop_provider();
    let err = execute(&provider, "shop", "SELEC * FROM orders").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Execution);
    assert!(err.to_string().contains("SELEC"));
    assert_eq!(provider.connect_count(), 1);
    assert_eq!(provider.close_count(), 1);
}

#[tokio::test]
async fn test_execute_scripted_failure() {
    let provider = FakeConnectionProvider::new()
        .with_database("shop", &["orders"])
        .with_failure("DELETE FROM orders", "permission denied for table orders");
    let err = execute(&provider, "shop", "DELETE FROM orders").await.unwrap_err();

    assert_eq!(
        err,
        AgentError::execution("permission denied for table orders")
    );
    assert_eq!(provider.open_connections(), 0);
}

#[tokio::test]
async fn test_execute_validates_before_connecting() {
    let provider = shop_provider();

    let err = execute(&provider, "shop", "   ").await.unwrap_err();
    assert_eq!(
        err,
        AgentError::Validation(ValidationError::RequiredFieldMissing {
            field: "sql".to_string()
        })
    );

    let err = execute(&provider, "", COUNT_ORDERS_SQL).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    assert_eq!(provider.connect_count(), 0);
}

#[tokio::test]
async fn test_connect_failure_surfaces_connection_error() {
    let provider = shop_provider().refusing_connections("connection refused");
    let err = list_databases(&provider).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Connection);
    assert_eq!(provider.connect_count(), 0);
    assert_eq!(provider.close_count(), 0);
}
