//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup with the size of the restored cart, shutdown.
//! - **Requests**: every client call opens a span (`add_product{product_id=1}`)
//!   and the actor logs the request it picked up at `debug`.
//! - **Commits**: `info` with item count and total after each persisted change.
//! - **Rejections**: `warn` with the error, right before the user notice goes out.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Commits and failures
//! RUST_LOG=info cargo run
//!
//! # Requests, lookups and snapshot writes too
//! RUST_LOG=debug cargo run
//!
//! # Only the storage layer
//! RUST_LOG=cart_store::storage=debug cargo run
//! ```
//!
//! With `RUST_LOG=info`, adding a product twice against a stock of one reads:
//!
//! ```text
//! INFO Cart actor started items=0
//! INFO Committed items=1 total=179.9
//! WARN Operation failed error=Insufficient stock for product 1: requested 2, available 1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
