//! Item record type.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Default for [`Item::is_available`] when a create payload omits it.
pub fn default_is_available() -> bool {
    true
}

/// A stored item, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique key, supplied by the client.
    pub id: i64,
    /// Display label. Not unique.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Whether the item can be ordered.
    #[serde(default = "default_is_available")]
    #[schema(default = true)]
    pub is_available: bool,
}

impl Item {
    /// Create an available item.
    pub fn new(id: i64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            is_available: default_is_available(),
        }
    }

    /// Set availability.
    pub fn with_availability(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }
}
