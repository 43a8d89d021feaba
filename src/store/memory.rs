//! In-memory item store.
//!
//! Items are kept in insertion order with an id → position index beside
//! them. All state sits behind one [`RwLock`], so the duplicate check and
//! the append in [`ItemStore::insert`] happen in a single critical section.
//! The stored-items gauge is updated inside that same section.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::types::Item;
use crate::error::StoreError;
use crate::metrics;

#[derive(Debug, Default)]
struct Inner {
    items: Vec<Item>,
    index: HashMap<i64, usize>,
}

/// Shared handle to the process-wide item collection.
///
/// Cloning is cheap; clones observe the same items.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    inner: Arc<RwLock<Inner>>,
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All items in insertion order.
    pub async fn list(&self) -> Vec<Item> {
        self.inner.read().await.items.clone()
    }

    /// Append `item` unless its id is already taken.
    ///
    /// On `DuplicateKey` the store is left unchanged.
    #[instrument(skip(self, item), fields(id = item.id))]
    pub async fn insert(&self, item: Item) -> Result<Item, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.index.contains_key(&item.id) {
            debug!("Rejecting duplicate item");
            return Err(StoreError::DuplicateKey { id: item.id });
        }

        let position = inner.items.len();
        inner.index.insert(item.id, position);
        inner.items.push(item.clone());
        metrics::set_items_stored(inner.items.len());

        Ok(item)
    }

    /// Look up an item by id.
    pub async fn get(&self, id: i64) -> Result<Item, StoreError> {
        let inner = self.inner.read().await;
        inner
            .index
            .get(&id)
            .and_then(|&position| inner.items.get(position))
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    /// Remove every item. Returns how many were removed.
    pub async fn clear(&self) -> usize {
        let mut inner = self.inner.write().await;
        let removed = inner.items.len();
        inner.items.clear();
        inner.index.clear();
        metrics::set_items_stored(0);
        removed
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    /// Whether the store holds no items.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
