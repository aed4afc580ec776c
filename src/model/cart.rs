//! The cart and its pure state transitions.
//!
//! [`Cart::apply`] takes the current cart and a [`CartAction`] and returns the
//! next cart. It never talks to services or storage; the cart actor validates a
//! request first, applies the action, and commits the result.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Product, ProductId};

/// Reasons a sequence of line items cannot form a cart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidCart {
    #[error("Duplicate product in cart: {0}")]
    DuplicateProduct(ProductId),

    #[error("Product {0} has an amount below 1")]
    EmptyAmount(ProductId),
}

/// A state transition over a [`Cart`].
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Replaces any entry with the same id by this one, appended at the end.
    Upsert(Product),
    /// Drops the entry with this id.
    Remove(ProductId),
    /// Sets the amount of an existing entry in place.
    SetAmount { id: ProductId, amount: u32 },
}

/// Ordered list of line items, unique by product id.
///
/// Serializes as a plain JSON array of [`Product`]. Deserialization rejects
/// duplicate ids and zero amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from line items, enforcing unique ids and amounts of at least 1.
    pub fn from_items(items: Vec<Product>) -> Result<Self, InvalidCart> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.amount < 1 {
                return Err(InvalidCart::EmptyAmount(item.id));
            }
            if !seen.insert(item.id) {
                return Err(InvalidCart::DuplicateProduct(item.id));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Amount of `id` currently in the cart, 0 when absent.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.amount)
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of every line item's subtotal.
    pub fn total(&self) -> f64 {
        self.items.iter().map(Product::subtotal).sum()
    }

    /// Applies `action` and returns the resulting cart.
    ///
    /// Actions targeting an id that is not in the cart (`Remove`, `SetAmount`)
    /// leave it unchanged.
    pub fn apply(mut self, action: CartAction) -> Self {
        match action {
            CartAction::Upsert(product) => {
                self.items.retain(|item| item.id != product.id);
                self.items.push(product);
            }
            CartAction::Remove(id) => {
                self.items.retain(|item| item.id != id);
            }
            CartAction::SetAmount { id, amount } => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                    item.amount = amount;
                }
            }
        }
        self
    }
}

impl TryFrom<Vec<Product>> for Cart {
    type Error = InvalidCart;

    fn try_from(items: Vec<Product>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<Product> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
