//! HTTP API route definitions.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::ApiDoc;
use super::handlers::{
    create_item, get_item, health, list_items, metrics_handler, reset_items, root, AppState,
};
use crate::metrics::track_http;

/// Create the API router.
///
/// `/metrics` is only mounted when `state` carries a Prometheus handle.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // Items
        .route("/items", get(list_items).post(create_item))
        .route("/items/:item_id", get(get_item))
        .route("/reset", post(reset_items));

    if state.metrics.is_some() {
        router = router.route("/metrics", get(metrics_handler));
    }

    router
        .route_layer(middleware::from_fn(track_http))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
