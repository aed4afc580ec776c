//! # Remote Services
//!
//! The two lookups the cart depends on, as traits so the actor can be wired to
//! the HTTP API in production and to in-memory doubles in tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{CatalogProduct, ProductId, Stock};

/// Errors raised while talking to the catalog or stock service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Source of product metadata.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetches a product by id. `Ok(None)` means the catalog has no such product.
    async fn fetch_product(&self, id: ProductId) -> Result<Option<CatalogProduct>, ServiceError>;
}

/// Source of available inventory.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Fetches the current stock level for a product.
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, ServiceError>;
}
