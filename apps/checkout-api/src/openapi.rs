use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Checkout API",
        version = "0.1.0",
        description = "API for managing the product pricing table and computing checkout subtotals"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/pricing", api = domain_pricing::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
