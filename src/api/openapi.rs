//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, records};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dublin Core Indexer API",
        version = "0.1.0",
        description = "Search index fields and deduplication keys for Dublin Core records",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        health::health_check,
        records::index_record,
        records::serialize_record,
        records::dedup_record,
    ),
    components(
        schemas(
            crate::models::record::RecordRequest,
            crate::models::record::IndexResponse,
            crate::models::record::SerializeResponse,
            crate::models::record::DedupResponse,
            crate::dc::DedupKeys,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "records", description = "Dublin Core record indexing")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
