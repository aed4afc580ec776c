//! # Cart Store
//!
//! > **A shopping cart for a storefront UI, run as an actor.**
//!
//! The cart keeps the list of products a shopper picked, checks every quantity
//! change against the stock service, persists itself after each change and
//! tells the shopper when something went wrong.
//!
//! ## 🏗️ Design
//!
//! ### One actor, one cart
//! The cart lives inside a single [`CartActor`](cart_actor::CartActor) running in
//! its own Tokio task. Requests queue up in its mailbox and are handled one at a
//! time, lookups included, so two clicks on "add" for the same product can never
//! both pass the stock check against the same starting amount.
//!
//! ### Pure transitions, separate commit
//! The rules for changing a cart are plain functions on [`Cart`](model::Cart)
//! ([`Cart::apply`](model::Cart::apply)). The actor validates, applies, then
//! commits through [`CartStore`](storage::CartStore): persist first, publish
//! second. A failed write leaves everything as it was.
//!
//! ### Injected, not global
//! UI code receives a [`CartClient`](clients::CartClient). It reads the current
//! cart, subscribes to changes and sends the three operations. Services, storage
//! and the notice sink are traits injected when the actor starts, which is also
//! what makes the whole thing testable with the doubles in [`framework::mock`].
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`]: `Product`, `Stock`, `Cart` and its transitions.
//! - [`cart_actor`]: the actor, its requests and [`CartError`](cart_actor::CartError).
//! - [`clients`]: `CartClient` plus the catalog/stock service traits and their HTTP client.
//! - [`storage`]: the key-value slot, file and memory backends.
//! - [`notice`]: user-facing notices and where they go.
//! - [`lifecycle`]: configuration, startup/shutdown, tracing setup.
//! - [`framework`]: mailbox plumbing and test doubles.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Point at a storefront API and watch the commits
//! CART_API_URL=http://localhost:3333 RUST_LOG=info cargo run
//!
//! cargo test
//! ```

pub mod cart_actor;
pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod notice;
pub mod storage;
