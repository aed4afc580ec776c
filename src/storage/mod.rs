//! # Snapshot Storage
//!
//! A durable key-value slot and the [`CartStore`] that owns the cart's entry in it.
//!
//! The cart actor never touches a backend directly: it hands the next cart to
//! [`CartStore::commit`] and only publishes it once the write went through.
//! Swapping [`FileStorage`] for [`MemoryStorage`] (or any other
//! [`KeyValueStorage`]) leaves the cart rules untouched.

pub mod file;
pub mod memory;

pub use file::*;
pub use memory::*;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::Cart;

/// Key under which the cart snapshot is stored.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Errors raised by a storage backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Could not serialize cart: {0}")]
    Serialize(String),
}

/// A string-valued key-value slot. Writes replace the whole value.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// The cart's persisted snapshot.
#[derive(Clone)]
pub struct CartStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl CartStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the initial cart.
    ///
    /// A missing, unreadable or malformed snapshot yields an empty cart.
    pub async fn load(&self) -> Cart {
        let raw = match self.storage.read(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No stored cart");
                return Cart::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Could not read stored cart");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                debug!(key = %self.key, items = cart.item_count(), "Loaded stored cart");
                cart
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding malformed stored cart");
                Cart::new()
            }
        }
    }

    /// Replaces the stored snapshot with `cart`.
    pub async fn commit(&self, cart: &Cart) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cart).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.storage.write(&self.key, &raw).await
    }
}
