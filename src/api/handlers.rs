//! HTTP API handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use super::schema::{ItemId, ItemPayload};
use crate::error::{ApiError, DetailResponse, StoreError, ValidationErrorResponse};
use crate::metrics;
use crate::store::{Item, ItemStore};

/// Version reported by the root endpoint and the OpenAPI document.
pub const API_VERSION: &str = "1.0.0";

/// Application state shared with handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// The item store.
    pub store: ItemStore,
    /// Prometheus render handle, if the exporter is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state with an empty store and no metrics exporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a Prometheus handle, enabling `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Root response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    /// Greeting.
    pub message: String,
    /// API version.
    pub version: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "healthy".
    pub status: String,
    /// Number of stored items.
    pub items_count: usize,
}

/// Reset response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResetResponse {
    /// Confirmation message.
    pub message: String,
    /// Items left in the store (always 0).
    pub count: usize,
}

/// Service descriptor.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service descriptor", body = RootResponse))
)]
pub async fn root() -> impl IntoResponse {
    Json(RootResponse {
        message: "Hello World".to_string(),
        version: API_VERSION.to_string(),
    })
}

/// Health check handler - always returns 200 with the current item count.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        items_count: state.store.len().await,
    })
}

/// List all items in insertion order.
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses((status = 200, description = "All items", body = Vec<Item>))
)]
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.store.list().await)
}

/// Create an item.
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = Item,
    responses(
        (status = 200, description = "Item created", body = Item),
        (status = 400, description = "An item with this id already exists", body = DetailResponse),
        (status = 422, description = "Payload failed validation", body = ValidationErrorResponse)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    ItemPayload(item): ItemPayload,
) -> Result<Json<Item>, ApiError> {
    match state.store.insert(item).await {
        Ok(item) => {
            info!(id = item.id, name = %item.name, "Item created");
            metrics::inc_items_created();
            Ok(Json(item))
        }
        Err(e) => {
            warn!("Create rejected: {}", e);
            metrics::inc_items_duplicate();
            Err(e.into())
        }
    }
}

/// Fetch a single item by id.
#[utoipa::path(
    get,
    path = "/items/{item_id}",
    tag = "items",
    params(("item_id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 404, description = "No item with this id", body = DetailResponse),
        (status = 422, description = "Id is not an integer", body = ValidationErrorResponse)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<Item>, ApiError> {
    state.store.get(id).await.map(Json).map_err(|e| {
        if let StoreError::NotFound { id } = e {
            debug!(id, "Item lookup missed");
            metrics::inc_items_not_found();
        }
        e.into()
    })
}

/// Remove every item.
#[utoipa::path(
    post,
    path = "/reset",
    responses((status = 200, description = "Store emptied", body = ResetResponse))
)]
pub async fn reset_items(State(state): State<AppState>) -> Json<ResetResponse> {
    let removed = state.store.clear().await;
    info!(removed, "Items reset");
    metrics::inc_store_resets();

    Json(ResetResponse {
        message: "Items reset".to_string(),
        count: 0,
    })
}

/// Prometheus exposition of all recorded metrics.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}
