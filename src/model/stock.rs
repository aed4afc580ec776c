use serde::{Deserialize, Serialize};

use super::ProductId;

/// Available quantity for a product, as reported by the Stock Service.
///
/// Fetched fresh for every operation that needs it; never cached or persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

impl Stock {
    pub fn new(id: ProductId, amount: u32) -> Self {
        Self { id, amount }
    }

    /// Returns true when `requested` units can be served from this stock level.
    pub fn covers(&self, requested: u64) -> bool {
        requested <= u64::from(self.amount)
    }
}
