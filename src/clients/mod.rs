//! Clients: the cart handle handed to UI code, and the remote services the cart calls.

pub mod api_client;
pub mod cart_client;
pub mod services;

pub use api_client::*;
pub use cart_client::*;
pub use services::*;
