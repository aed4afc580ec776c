//! Runtime orchestration: configuration, wiring and shutdown of the cart actor,
//! and logging setup.

pub mod cart_system;
pub mod config;
pub mod tracing;

pub use cart_system::*;
pub use config::*;
pub use self::tracing::*;
