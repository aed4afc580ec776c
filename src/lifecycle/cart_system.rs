use std::sync::Arc;

use tracing::{error, info};

use super::CartConfig;
use crate::cart_actor::{CartContext, CartError};
use crate::clients::{ApiClient, CartClient};
use crate::notice::Notifier;
use crate::storage::{CartStore, FileStorage};

/// Owns the running cart actor.
///
/// `CartSystem` is responsible for:
/// - **Initialization**: restoring the cart from its persisted snapshot before
///   the first request is served (no service calls happen here)
/// - **Dependency Wiring**: injecting services, storage and notifier into the actor
/// - **Lifecycle Management**: spawning the actor task and waiting for it on shutdown
///
/// # Example
///
/// ```ignore
/// let system = CartSystem::from_config(&CartConfig::from_env()?, Arc::new(LogNotifier)).await?;
///
/// // Hand clones of the client to UI components
/// let cart = system.cart_client.clone();
/// cart.add_product(1).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    /// Client for interacting with the cart actor
    pub cart_client: CartClient,

    /// Task handle of the running actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl CartSystem {
    /// Loads the persisted cart and starts the actor with `context`.
    pub async fn start(mailbox_size: usize, context: CartContext) -> Self {
        let initial = context.store.load().await;
        info!(key = context.store.key(), items = initial.item_count(), "Restored cart");

        let (actor, cart_client) = crate::cart_actor::new(mailbox_size, initial);
        let handle = tokio::spawn(actor.run(context));

        Self { cart_client, handle }
    }

    /// Starts a cart backed by the HTTP API and file storage described by `config`.
    pub async fn from_config(config: &CartConfig, notifier: Arc<dyn Notifier>) -> Result<Self, CartError> {
        let api = Arc::new(ApiClient::new(config.api_url.clone(), config.request_timeout)?);
        let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        let store = CartStore::new(storage, config.storage_key.clone());
        let context = CartContext::new(api.clone(), api, store, notifier);

        Ok(Self::start(config.mailbox_size, context).await)
    }

    /// Gracefully shuts down the cart.
    ///
    /// Dropping the client closes the mailbox once every clone handed out is
    /// gone too; the actor then drains its queue and exits.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart...");

        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Cart actor failed: {:?}", e);
            return Err(format!("Cart actor failed: {:?}", e));
        }

        info!("Cart shutdown complete.");
        Ok(())
    }
}
