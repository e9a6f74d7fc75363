//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the purchase callback and the health probes. The
//! document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for payment provider integration.

use utoipa::OpenApi;

/// OpenAPI document for the HTTP interface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Purchase recorder API",
        description = "Payment callback recording purchased catalogue items into server-side sessions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::callback::record_purchase,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    tags(
        (name = "purchases", description = "Payment provider callbacks"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
