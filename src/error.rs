//! Unified error types for the items service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Process-level error type (startup, configuration, serving).
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Prometheus exporter could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error (bind, serve).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Item store errors.
///
/// The `Display` text of each variant is the `detail` string returned to clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An item with this id is already stored.
    #[error("Item with ID {id} already exists")]
    DuplicateKey {
        /// The conflicting id.
        id: i64,
    },

    /// No item with this id is stored.
    #[error("Item not found")]
    NotFound {
        /// The id that was looked up.
        id: i64,
    },
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Location of the offending value, e.g. `["body", "price"]`.
    pub loc: Vec<String>,
    /// Human-readable message.
    pub msg: String,
    /// Machine-readable error kind, e.g. `missing` or `int_type`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new<L, S>(loc: L, msg: impl Into<String>, kind: impl Into<String>) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            loc: loc.into_iter().map(Into::into).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

/// Request-level error, rendered as an HTTP response.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request payload or path failed schema validation.
    #[error("request validation failed ({} errors)", .0.len())]
    Validation(Vec<FieldError>),

    /// Store rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Error body carrying a single message.
#[derive(Debug, Serialize, ToSchema)]
pub struct DetailResponse {
    /// Error message.
    pub detail: String,
}

/// Error body carrying field-level validation failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// One entry per failing field.
    pub detail: Vec<FieldError>,
}

impl ApiError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(StoreError::DuplicateKey { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(detail) => {
                (status, Json(ValidationErrorResponse { detail })).into_response()
            }
            ApiError::Store(err) => (
                status,
                Json(DetailResponse {
                    detail: err.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
