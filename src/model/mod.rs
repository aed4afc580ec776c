//! Pure data structures for the cart: line items, stock snapshots and the cart itself.

pub mod cart;
pub mod product;
pub mod stock;

pub use cart::*;
pub use product::*;
pub use stock::*;
