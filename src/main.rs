//! Demo: drives the cart against a running storefront API.
//!
//! Adds product 1 twice, bumps its amount, then removes it, printing the cart
//! and any notices along the way.

use std::sync::Arc;

use cart_store::cart_actor::UpdateProductAmount;
use cart_store::lifecycle::{setup_tracing, CartConfig, CartSystem};
use cart_store::notice::BroadcastNotifier;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = CartConfig::from_env().map_err(|e| e.to_string())?;
    info!(api_url = %config.api_url, storage_dir = %config.storage_dir.display(), "Starting cart demo");

    let notifier = BroadcastNotifier::new(16);
    let mut notices = notifier.subscribe();
    tokio::spawn(async move {
        while let Ok(notice) = notices.recv().await {
            warn!(%notice, "Toast");
        }
    });

    let system = CartSystem::from_config(&config, Arc::new(notifier))
        .await
        .map_err(|e| e.to_string())?;
    let cart = system.cart_client.clone();

    let mut changes = cart.subscribe();
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let snapshot = changes.borrow_and_update().clone();
            info!(items = snapshot.item_count(), total = snapshot.total(), "Cart changed");
        }
    });

    let span = tracing::info_span!("shopping");
    async {
        // Failures are reported as notices; the results only matter for the log.
        let _ = cart.add_product(1).await;
        let _ = cart.add_product(1).await;
        let _ = cart
            .update_product_amount(UpdateProductAmount { product_id: 1, amount: 3 })
            .await;
        let _ = cart.remove_product(1).await;
    }
    .instrument(span)
    .await;

    for item in cart.cart().items() {
        info!(id = item.id, title = %item.title, amount = item.amount, "In cart");
    }

    drop(cart);
    system.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
