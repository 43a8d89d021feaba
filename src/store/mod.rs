//! Item storage.
//!
//! This module handles:
//! - The `Item` record type
//! - The process-local, insertion-ordered item store

pub mod memory;
pub mod types;

pub use memory::ItemStore;
pub use types::{default_is_available, Item};
