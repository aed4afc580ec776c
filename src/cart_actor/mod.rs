//! The cart itself: an actor owning the current [`Cart`](crate::model::Cart).

mod actions;
pub mod actor;
pub mod error;

pub use actions::*;
pub use actor::*;
pub use error::*;

use crate::clients::CartClient;
use crate::model::Cart;

/// Creates a cart actor seeded with `initial` and the client that talks to it.
pub fn new(buffer_size: usize, initial: Cart) -> (CartActor, CartClient) {
    CartActor::new(buffer_size, initial)
}
