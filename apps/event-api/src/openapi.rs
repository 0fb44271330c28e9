//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event API",
        version = "0.1.0",
        description = "MongoDB-based REST API for managing events",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/v3/app/events", api = domain_events::ApiDoc)
    ),
    tags(
        (name = "Events", description = "Event management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
