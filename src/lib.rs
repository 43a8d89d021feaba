//! Minimal in-memory items CRUD service.
//!
//! Items are created, listed and fetched over HTTP and live only for the
//! lifetime of the process:
//!
//! ```text
//! GET  /                 service descriptor
//! GET  /health           status + item count
//! GET  /items            all items, insertion order
//! POST /items            create (400 on duplicate id, 422 on bad payload)
//! GET  /items/{item_id}  one item (404 if absent)
//! POST /reset            remove every item
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: Item type and in-memory store
//! - [`api`]: HTTP handlers, validation, routes and OpenAPI docs
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
