//! # Cart Client
//!
//! The handle UI components hold. It is cheap to clone, so one instance can be
//! passed down to every component that needs the cart (the provider/context
//! equivalent), and it hides the message passing behind plain async methods.
//!
//! Mutations resolve to the cart after the operation. Callers that treat them
//! as fire-and-forget can ignore the result: failures have already been
//! reported through the configured [`Notifier`](crate::notice::Notifier), and
//! the new state shows up on [`CartClient::subscribe`].
//!
//! The exception is a mailbox failure. Notices are emitted inside the actor, so
//! when the actor has stopped (`FrameworkError::ActorClosed`) or dropped the
//! request without replying (`FrameworkError::ActorDropped`), the call returns
//! [`CartError::Framework`] and no notice is shown. Callers that must surface
//! those failures have to inspect the result.

use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use crate::cart_actor::{CartError, CartRequest, UpdateProductAmount};
use crate::framework::call;
use crate::model::{Cart, ProductId};

/// Client for interacting with the cart actor.
#[derive(Debug, Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    snapshot: watch::Receiver<Cart>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>, snapshot: watch::Receiver<Cart>) -> Self {
        Self { sender, snapshot }
    }

    /// The current cart.
    pub fn cart(&self) -> Cart {
        self.snapshot.borrow().clone()
    }

    /// A receiver that wakes up on every committed change.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.snapshot.clone()
    }

    /// Adds one unit of `product_id`, subject to stock.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        debug!("Sending request");
        call(&self.sender, |respond_to| CartRequest::AddProduct {
            product_id,
            respond_to,
        })
        .await?
    }

    /// Removes `product_id` from the cart.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        debug!("Sending request");
        call(&self.sender, |respond_to| CartRequest::RemoveProduct {
            product_id,
            respond_to,
        })
        .await?
    }

    /// Sets the amount of a product already in the cart, subject to stock.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&self, update: UpdateProductAmount) -> Result<Cart, CartError> {
        debug!("Sending request");
        call(&self.sender, |respond_to| CartRequest::UpdateProductAmount {
            update,
            respond_to,
        })
        .await?
    }
}
