//! # Mailbox Plumbing
//!
//! The request/response building blocks shared by the cart actor and its client.
//!
//! ## Key Types
//!
//! - [`FrameworkError`]: failures of the mailbox itself (actor gone, reply dropped).
//! - [`Response`]: the one-shot reply channel carried inside every request.
//! - [`call`]: send a request and await its reply.

use tokio::sync::{mpsc, oneshot};

/// Errors that can occur while talking to an actor, independent of what it manages.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<T>;

/// Sends the request built by `request` and waits for the actor's reply.
///
/// # Architecture Note
/// Every request message embeds its own reply channel. The caller builds the
/// message around the sender half and keeps the receiver half, so the actor
/// never needs to know who is asking.
pub async fn call<M, T>(
    sender: &mpsc::Sender<M>,
    request: impl FnOnce(Response<T>) -> M,
) -> Result<T, FrameworkError> {
    let (respond_to, response) = oneshot::channel();
    sender
        .send(request(respond_to))
        .await
        .map_err(|_| FrameworkError::ActorClosed)?;
    response.await.map_err(|_| FrameworkError::ActorDropped)
}
