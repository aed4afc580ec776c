//! Error types for the cart actor.

use thiserror::Error;

use crate::clients::ServiceError;
use crate::framework::FrameworkError;
use crate::model::ProductId;
use crate::notice::Notice;
use crate::storage::StorageError;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The catalog has no product with this id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// The operation targets a product that is not in the cart.
    #[error("Product does not exist in cart: {0}")]
    AbsentEntry(ProductId),

    /// The catalog or stock service failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The snapshot could not be committed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An error occurred while communicating with the cart actor.
    #[error("Actor communication error: {0}")]
    Framework(#[from] FrameworkError),
}

impl CartError {
    /// The notice shown to the user when an operation fails with this error.
    ///
    /// Out-of-stock has its own message; everything else collapses into the
    /// operation's generic notice.
    pub fn notice(&self, generic: Notice) -> Notice {
        match self {
            CartError::OutOfStock { .. } => Notice::OutOfStock,
            _ => generic,
        }
    }
}
