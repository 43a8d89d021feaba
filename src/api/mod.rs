//! HTTP API module: item endpoints, health, metrics and OpenAPI docs.

pub mod docs;
pub mod handlers;
pub mod routes;
pub mod schema;

pub use handlers::AppState;
pub use routes::create_router;
