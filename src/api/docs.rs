//! OpenAPI document for the HTTP API.

use utoipa::OpenApi;

use super::handlers::{self, HealthResponse, ResetResponse, RootResponse};
use crate::error::{DetailResponse, FieldError, ValidationErrorResponse};
use crate::store::Item;

/// OpenAPI documentation served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(title = "Demo API", version = "1.0.0"),
    paths(
        handlers::root,
        handlers::health,
        handlers::list_items,
        handlers::create_item,
        handlers::get_item,
        handlers::reset_items,
    ),
    components(schemas(
        Item,
        RootResponse,
        HealthResponse,
        ResetResponse,
        DetailResponse,
        FieldError,
        ValidationErrorResponse
    )),
    tags((name = "items", description = "Item management endpoints"))
)]
pub struct ApiDoc;
