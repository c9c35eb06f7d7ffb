//! OpenAPI document for the REST API.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes;
use crate::types::{
    DatabasesResponse, ExecuteSqlRequest, ExecuteSqlResponse, GenerateSqlRequest,
    GenerateSqlResponse, HealthResponse, HealthStatus, SchemaResponse, TablesResponse,
};
use sqlagent_core::ColumnInfo;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "sqlagent API",
        description = "Natural-language to SQL query assistant",
        license(name = "MIT")
    ),
    paths(
        routes::catalog::list_databases,
        routes::catalog::list_tables,
        routes::catalog::table_schema,
        routes::query::generate_sql,
        routes::query::execute_sql,
        routes::health::health,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        ColumnInfo,
        DatabasesResponse,
        TablesResponse,
        SchemaResponse,
        GenerateSqlRequest,
        GenerateSqlResponse,
        ExecuteSqlRequest,
        ExecuteSqlResponse,
        HealthResponse,
        HealthStatus,
    )),
    tags(
        (name = "Catalog", description = "Database, table and column introspection"),
        (name = "Query", description = "Question translation and statement execution"),
        (name = "Health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Pretty-printed JSON document.
    pub fn to_pretty_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::openapi())
    }
}
