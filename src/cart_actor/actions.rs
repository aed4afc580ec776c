//! Requests accepted by the cart actor.
//!
//! Each variant maps to one public operation of the
//! [`CartClient`](crate::clients::CartClient) and carries the channel on which
//! the actor replies with the resulting cart.

use super::CartError;
use crate::framework::Response;
use crate::model::{Cart, ProductId};

/// Target quantity for a product already in the cart.
///
/// `amount` is signed: requests below 1 are accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Reply to a cart request: the cart after the operation.
pub type CartReply = Response<Result<Cart, CartError>>;

/// Messages processed by the [`CartActor`](super::CartActor).
#[derive(Debug)]
pub enum CartRequest {
    AddProduct {
        product_id: ProductId,
        respond_to: CartReply,
    },
    RemoveProduct {
        product_id: ProductId,
        respond_to: CartReply,
    },
    UpdateProductAmount {
        update: UpdateProductAmount,
        respond_to: CartReply,
    },
}
