//! HTTP handlers for the pricing domain

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::{PricingError, PricingResult};
use crate::models::{
    CreateProduct, DeleteCodes, DeletedCodes, LineItem, Product, SubtotalResponse, UpdateProduct,
    UpsertProduct,
};
use crate::repository::PricingRepository;
use crate::service::PricingService;

/// OpenAPI documentation for the Pricing API
#[derive(OpenApi)]
#[openapi(
    paths(
        get_table,
        add_product,
        replace_table,
        upsert_products,
        delete_products,
        patch_product,
        compute_subtotal,
    ),
    components(
        schemas(
            Product,
            CreateProduct,
            UpdateProduct,
            UpsertProduct,
            LineItem,
            DeleteCodes,
            DeletedCodes,
            SubtotalResponse,
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Pricing table and checkout subtotal endpoints")
    )
)]
pub struct ApiDoc;

/// Create the pricing router with all HTTP endpoints
pub fn router<R: PricingRepository + 'static>(service: PricingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(get_table)
                .post(add_product)
                .put(replace_table)
                .patch(upsert_products)
                .delete(delete_products),
        )
        .route("/{code}", patch(patch_product))
        .route("/subtotal", post(compute_subtotal))
        .with_state(shared_service)
}

/// Decode a JSON body that arrived as a raw value.
///
/// List-shaped bodies bypass `ValidatedJson` (Vec has no `Validate` impl),
/// so shape errors are mapped here: a missing field keeps its own error
/// kind, anything else is a shape mismatch.
fn decode<T: DeserializeOwned>(value: serde_json::Value) -> PricingResult<T> {
    serde_json::from_value(value).map_err(|e| {
        let message = e.to_string();
        if message.starts_with("missing field") {
            PricingError::MissingField(message)
        } else {
            PricingError::BadInputShape(message)
        }
    })
}

/// Get the full pricing table
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "All products, ordered by code", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_table<R: PricingRepository>(
    State(service): State<Arc<PricingService<R>>>,
) -> PricingResult<Json<Vec<Product>>> {
    let products = service.get_table().await?;
    Ok(Json(products))
}

/// Add a product, replacing any existing product with the same code
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product stored", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_product<R: PricingRepository>(
    State(service): State<Arc<PricingService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> PricingResult<impl IntoResponse> {
    let product = service.add_or_replace(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace the whole pricing table
#[utoipa::path(
    put,
    path = "",
    tag = entity::Model::TAG,
    request_body = Vec<CreateProduct>,
    responses(
        (status = 200, description = "New pricing table", body = Vec<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_table<R: PricingRepository>(
    State(service): State<Arc<PricingService<R>>>,
    Json(body): Json<serde_json::Value>,
) -> PricingResult<Json<Vec<Product>>> {
    let inputs: Vec<CreateProduct> = decode(body)?;
    let products = service.replace_table(inputs).await?;
    Ok(Json(products))
}

/// Insert or patch several products in one atomic batch
#[utoipa::path(
    patch,
    path = "",
    tag = entity::Model::TAG,
    request_body = Vec<UpsertProduct>,
    responses(
        (status = 200, description = "Resulting products, in request order", body = Vec<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upsert_products<R: PricingRepository>(
    State(service): State<Arc<PricingService<R>>>,
    Json(body): Json<serde_json::Value>,
) -> PricingResult<Json<Vec<Product>>> {
    let inputs: Vec<UpsertProduct> = decode(body)?;
    let products = service.upsert_products(inputs).await?;
    Ok(Json(products))
}

/// Delete products by code
#[utoipa::path(
    delete,
    path = "",
    tag = entity::Model::TAG,
    request_body = DeleteCodes,
    responses(
        (status = 200, description = "Codes that were removed", body = DeletedCodes),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_products<R: PricingRepository>(
    State(service): State<Arc<PricingService<R>>>,
    Json(body): Json<serde_json::Value>,
) -> PricingResult<Json<DeletedCodes>> {
    let request: DeleteCodes = decode(body)?;
    let deleted = service.delete_products(request.codes).await?;
    Ok(Json(DeletedCodes { deleted }))
}

/// Patch a single existing product
#[utoipa::path(
    patch,
    path = "/{code}",
    tag = entity::Model::TAG,
    params(
        ("code" = String, Path, description = "Product code")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Patched product", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_product<R: PricingRepository>(
    State(service): State<Arc<PricingService<R>>>,
    Path(code): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> PricingResult<Json<Product>> {
    let product = service.patch_product(&code, input).await?;
    Ok(Json(product))
}

/// Compute the subtotal for a list of line items
#[utoipa::path(
    post,
    path = "/subtotal",
    tag = entity::Model::TAG,
    request_body = Vec<LineItem>,
    responses(
        (status = 200, description = "Checkout subtotal", body = SubtotalResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn compute_subtotal<R: PricingRepository>(
    State(service): State<Arc<PricingService<R>>>,
    Json(body): Json<serde_json::Value>,
) -> PricingResult<Json<SubtotalResponse>> {
    let items: Vec<LineItem> = decode(body)?;
    let subtotal = service.compute_subtotal(&items).await?;
    Ok(Json(SubtotalResponse { subtotal }))
}
