//! Actor plumbing and test doubles.
//!
//! # Main Components
//!
//! - [`FrameworkError`] - Mailbox failures
//! - [`Response`] - One-shot reply channel embedded in requests
//! - [`call`] - Request/reply helper used by clients
//!
//! # Testing
//!
//! See [`mock`] for scripted services, a recording notifier and helpers to test
//! the [`CartClient`](crate::clients::CartClient) without spawning an actor.

pub mod core;
pub mod mock;

pub use self::core::*;
