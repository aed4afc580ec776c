//! # Cart Actor
//!
//! The server half of the cart. It owns the current cart, takes requests off
//! its mailbox one at a time and runs each to completion (service lookups,
//! validation, commit) before looking at the next.
//!
//! **Ordering**: because requests are processed sequentially, two operations on
//! the same product can never interleave their read-check-write steps. The
//! later request always sees the cart left by the earlier one.
//!
//! **Commit**: a transition is first written through the [`CartStore`]; only
//! when the write succeeds does the actor swap its state and publish the new
//! snapshot to subscribers. Any failure leaves both the stored snapshot and
//! the in-memory cart untouched.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::{CartError, CartRequest, UpdateProductAmount};
use crate::clients::{CartClient, CatalogService, ServiceError, StockService};
use crate::model::{Cart, CartAction, Product, ProductId, Stock};
use crate::notice::{Notice, Notifier};
use crate::storage::CartStore;

/// Dependencies injected into the actor when it starts running.
#[derive(Clone)]
pub struct CartContext {
    pub catalog: Arc<dyn CatalogService>,
    pub stock: Arc<dyn StockService>,
    pub store: CartStore,
    pub notifier: Arc<dyn Notifier>,
}

impl CartContext {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        stock: Arc<dyn StockService>,
        store: CartStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            stock,
            store,
            notifier,
        }
    }
}

/// The actor that manages the cart.
pub struct CartActor {
    receiver: mpsc::Receiver<CartRequest>,
    state: watch::Sender<Cart>,
}

impl CartActor {
    pub fn new(buffer_size: usize, initial: Cart) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (state, snapshot) = watch::channel(initial);
        let actor = Self { receiver, state };
        let client = CartClient::new(sender, snapshot);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self, context: CartContext) {
        info!(items = self.state.borrow().item_count(), "Cart actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddProduct { product_id, respond_to } => {
                    debug!(product_id, "AddProduct");
                    let result = self.add_product(product_id, &context).await;
                    report(&result, Notice::AddFailed, &context);
                    let _ = respond_to.send(result);
                }
                CartRequest::RemoveProduct { product_id, respond_to } => {
                    debug!(product_id, "RemoveProduct");
                    let result = self.remove_product(product_id, &context).await;
                    report(&result, Notice::RemoveFailed, &context);
                    let _ = respond_to.send(result);
                }
                CartRequest::UpdateProductAmount { update, respond_to } => {
                    debug!(product_id = update.product_id, amount = update.amount, "UpdateProductAmount");
                    let result = self.update_product_amount(update, &context).await;
                    report(&result, Notice::UpdateFailed, &context);
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(items = self.state.borrow().item_count(), "Shutdown");
    }

    fn current(&self) -> Cart {
        self.state.borrow().clone()
    }

    async fn add_product(&self, product_id: ProductId, ctx: &CartContext) -> Result<Cart, CartError> {
        let catalog = ctx
            .catalog
            .fetch_product(product_id)
            .await?
            .ok_or(CartError::NotFound(product_id))?;
        if catalog.id != product_id {
            return Err(ServiceError::Decode(format!(
                "catalog returned product {} for {}",
                catalog.id, product_id
            ))
            .into());
        }

        let cart = self.current();
        let requested = cart.amount_of(product_id).saturating_add(1);

        let stock = fetch_stock(product_id, ctx).await?;
        ensure_in_stock(product_id, u64::from(requested), &stock)?;

        let next = cart.apply(CartAction::Upsert(Product::from_catalog(catalog, requested)));
        self.commit(next, ctx).await
    }

    async fn remove_product(&self, product_id: ProductId, ctx: &CartContext) -> Result<Cart, CartError> {
        let cart = self.current();
        if !cart.contains(product_id) {
            return Err(CartError::AbsentEntry(product_id));
        }

        let next = cart.apply(CartAction::Remove(product_id));
        self.commit(next, ctx).await
    }

    async fn update_product_amount(
        &self,
        update: UpdateProductAmount,
        ctx: &CartContext,
    ) -> Result<Cart, CartError> {
        let UpdateProductAmount { product_id, amount } = update;
        if amount < 1 {
            debug!(product_id, amount, "Ignoring amount below 1");
            return Ok(self.current());
        }

        let requested = amount.unsigned_abs();
        let stock = fetch_stock(product_id, ctx).await?;
        ensure_in_stock(product_id, requested, &stock)?;

        let cart = self.current();
        if !cart.contains(product_id) {
            debug!(product_id, "Ignoring update for product not in cart");
            return Ok(cart);
        }

        // Bounded by the stock level checked above.
        let amount = u32::try_from(requested).unwrap_or(stock.amount);
        let next = cart.apply(CartAction::SetAmount { id: product_id, amount });
        self.commit(next, ctx).await
    }

    /// Persists `next`, then makes it the current cart.
    async fn commit(&self, next: Cart, ctx: &CartContext) -> Result<Cart, CartError> {
        ctx.store.commit(&next).await?;
        self.state.send_replace(next.clone());
        info!(items = next.item_count(), total = next.total(), "Committed");
        Ok(next)
    }
}

/// Fetches stock for `product_id`, rejecting a record that belongs to another product.
async fn fetch_stock(product_id: ProductId, ctx: &CartContext) -> Result<Stock, CartError> {
    let stock = ctx.stock.fetch_stock(product_id).await?;
    if stock.id != product_id {
        return Err(ServiceError::Decode(format!(
            "stock service returned product {} for {}",
            stock.id, product_id
        ))
        .into());
    }
    Ok(stock)
}

fn ensure_in_stock(product_id: ProductId, requested: u64, stock: &Stock) -> Result<(), CartError> {
    if stock.covers(requested) {
        Ok(())
    } else {
        Err(CartError::OutOfStock {
            product_id,
            requested,
            available: stock.amount,
        })
    }
}

fn report(result: &Result<Cart, CartError>, generic: Notice, ctx: &CartContext) {
    if let Err(e) = result {
        warn!(error = %e, "Operation failed");
        ctx.notifier.notify(e.notice(generic));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{FakeApi, MockCatalog, MockStock, RecordingNotifier};
    use crate::model::CatalogProduct;
    use crate::storage::{MemoryStorage, CART_STORAGE_KEY};

    struct Harness {
        client: CartClient,
        storage: Arc<MemoryStorage>,
        notifier: Arc<RecordingNotifier>,
    }

    fn spawn(initial: Cart, catalog: Arc<dyn CatalogService>, stock: Arc<dyn StockService>) -> Harness {
        let storage = Arc::new(MemoryStorage::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let context = CartContext::new(
            catalog,
            stock,
            CartStore::new(storage.clone(), CART_STORAGE_KEY),
            notifier.clone(),
        );
        let (actor, client) = CartActor::new(8, initial);
        tokio::spawn(actor.run(context));
        Harness {
            client,
            storage,
            notifier,
        }
    }

    fn sneaker(amount: u32) -> Product {
        Product::new(1, "Sneaker", 10.0, "https://img/1.jpg", amount)
    }

    fn sneaker_catalog() -> CatalogProduct {
        CatalogProduct {
            id: 1,
            title: "Sneaker".into(),
            price: 10.0,
            image: "https://img/1.jpg".into(),
        }
    }

    #[tokio::test]
    async fn test_add_product_to_empty_cart() {
        let api = Arc::new(FakeApi::new().with_product(sneaker_catalog(), 5));
        let h = spawn(Cart::new(), api.clone(), api);

        let cart = h.client.add_product(1).await.unwrap();

        assert_eq!(cart.items(), &[sneaker(1)]);
        assert_eq!(h.client.cart(), cart);
        assert_eq!(h.storage.writes(), 1);
        assert!(h.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_add_existing_product_increments_amount() {
        let api = Arc::new(FakeApi::new().with_product(sneaker_catalog(), 5));
        let h = spawn(Cart::from_items(vec![sneaker(2)]).unwrap(), api.clone(), api);

        let cart = h.client.add_product(1).await.unwrap();

        assert_eq!(cart.amount_of(1), 3);
    }

    #[tokio::test]
    async fn test_add_product_at_stock_limit_is_rejected() {
        let api = Arc::new(FakeApi::new().with_product(sneaker_catalog(), 5));
        let initial = Cart::from_items(vec![sneaker(5)]).unwrap();
        let h = spawn(initial.clone(), api.clone(), api);

        let result = h.client.add_product(1).await;

        assert_eq!(
            result,
            Err(CartError::OutOfStock {
                product_id: 1,
                requested: 6,
                available: 5
            })
        );
        assert_eq!(h.client.cart(), initial);
        assert_eq!(h.storage.writes(), 0);
        assert_eq!(h.notifier.notices(), vec![Notice::OutOfStock]);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let mut catalog = MockCatalog::new();
        catalog.expect_fetch(42).return_ok(None);
        let catalog = Arc::new(catalog);
        let h = spawn(Cart::new(), catalog.clone(), Arc::new(MockStock::new()));

        let result = h.client.add_product(42).await;

        assert_eq!(result, Err(CartError::NotFound(42)));
        assert!(h.client.cart().is_empty());
        assert_eq!(h.notifier.notices(), vec![Notice::AddFailed]);
        catalog.verify();
    }

    #[tokio::test]
    async fn test_add_product_with_stock_service_down() {
        let mut catalog = MockCatalog::new();
        catalog.expect_fetch(1).return_ok(Some(sneaker_catalog()));
        let mut stock = MockStock::new();
        stock
            .expect_fetch(1)
            .return_err(ServiceError::Request("connection refused".into()));
        let h = spawn(Cart::new(), Arc::new(catalog), Arc::new(stock));

        let result = h.client.add_product(1).await;

        assert!(matches!(result, Err(CartError::Service(ServiceError::Request(_)))));
        assert!(h.client.cart().is_empty());
        assert_eq!(h.notifier.notices(), vec![Notice::AddFailed]);
    }

    #[tokio::test]
    async fn test_add_product_when_catalog_returns_another_id() {
        let mut catalog = MockCatalog::new();
        catalog.expect_fetch(2).return_ok(Some(sneaker_catalog()));
        let h = spawn(Cart::new(), Arc::new(catalog), Arc::new(MockStock::new()));

        let result = h.client.add_product(2).await;

        assert!(matches!(result, Err(CartError::Service(ServiceError::Decode(_)))));
        assert_eq!(h.notifier.notices(), vec![Notice::AddFailed]);
    }

    #[tokio::test]
    async fn test_add_product_when_stock_returns_another_id() {
        let mut catalog = MockCatalog::new();
        catalog.expect_fetch(1).return_ok(Some(sneaker_catalog()));
        let mut stock = MockStock::new();
        stock.expect_fetch(1).return_ok(Stock::new(2, 50));
        let h = spawn(Cart::new(), Arc::new(catalog), Arc::new(stock));

        let result = h.client.add_product(1).await;

        assert!(matches!(result, Err(CartError::Service(ServiceError::Decode(_)))));
        assert!(h.client.cart().is_empty());
        assert_eq!(h.storage.writes(), 0);
        assert_eq!(h.notifier.notices(), vec![Notice::AddFailed]);
    }

    #[tokio::test]
    async fn test_update_amount_when_stock_returns_another_id() {
        let mut stock = MockStock::new();
        stock.expect_fetch(1).return_ok(Stock::new(9, 50));
        let h = spawn(
            Cart::from_items(vec![sneaker(1)]).unwrap(),
            Arc::new(MockCatalog::new()),
            Arc::new(stock),
        );

        let result = h
            .client
            .update_product_amount(UpdateProductAmount { product_id: 1, amount: 3 })
            .await;

        assert!(matches!(result, Err(CartError::Service(ServiceError::Decode(_)))));
        assert_eq!(h.client.cart().amount_of(1), 1);
        assert_eq!(h.storage.writes(), 0);
        assert_eq!(h.notifier.notices(), vec![Notice::UpdateFailed]);
    }

    #[tokio::test]
    async fn test_commit_failure_leaves_cart_unchanged() {
        let api = Arc::new(FakeApi::new().with_product(sneaker_catalog(), 5));
        let h = spawn(Cart::new(), api.clone(), api);
        h.storage.fail_writes(true);

        let result = h.client.add_product(1).await;

        assert!(matches!(result, Err(CartError::Storage(_))));
        assert!(h.client.cart().is_empty());
        assert_eq!(h.notifier.notices(), vec![Notice::AddFailed]);
    }

    #[tokio::test]
    async fn test_remove_product() {
        let api = Arc::new(FakeApi::new());
        let h = spawn(Cart::from_items(vec![sneaker(2)]).unwrap(), api.clone(), api);

        let cart = h.client.remove_product(1).await.unwrap();

        assert!(cart.is_empty());
        assert_eq!(h.storage.value(CART_STORAGE_KEY).as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_remove_absent_product() {
        let api = Arc::new(FakeApi::new());
        let initial = Cart::from_items(vec![sneaker(2)]).unwrap();
        let h = spawn(initial.clone(), api.clone(), api);

        let result = h.client.remove_product(9).await;

        assert_eq!(result, Err(CartError::AbsentEntry(9)));
        assert_eq!(h.client.cart(), initial);
        assert_eq!(h.storage.writes(), 0);
        assert_eq!(h.notifier.notices(), vec![Notice::RemoveFailed]);
    }

    #[tokio::test]
    async fn test_update_amount_below_one_is_ignored() {
        // No expectations: any service call would panic the mock.
        let h = spawn(
            Cart::from_items(vec![sneaker(2)]).unwrap(),
            Arc::new(MockCatalog::new()),
            Arc::new(MockStock::new()),
        );

        for amount in [0, -3] {
            let cart = h
                .client
                .update_product_amount(UpdateProductAmount { product_id: 1, amount })
                .await
                .unwrap();
            assert_eq!(cart.amount_of(1), 2);
        }
        assert_eq!(h.storage.writes(), 0);
        assert!(h.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_update_amount_beyond_stock() {
        let mut stock = MockStock::new();
        stock.expect_fetch(2).return_ok(Stock::new(2, 4));
        let initial = Cart::from_items(vec![Product::new(2, "Boot", 99.9, "https://img/2.jpg", 3)]).unwrap();
        let h = spawn(initial.clone(), Arc::new(MockCatalog::new()), Arc::new(stock));

        let result = h
            .client
            .update_product_amount(UpdateProductAmount { product_id: 2, amount: 10 })
            .await;

        assert!(matches!(result, Err(CartError::OutOfStock { requested: 10, available: 4, .. })));
        assert_eq!(h.client.cart(), initial);
        assert_eq!(h.storage.writes(), 0);
        assert_eq!(h.notifier.notices(), vec![Notice::OutOfStock]);
    }

    #[tokio::test]
    async fn test_update_amount_for_product_not_in_cart_is_ignored() {
        let mut stock = MockStock::new();
        stock.expect_fetch(3).return_ok(Stock::new(3, 10));
        let stock = Arc::new(stock);
        let h = spawn(Cart::new(), Arc::new(MockCatalog::new()), stock.clone());

        let cart = h
            .client
            .update_product_amount(UpdateProductAmount { product_id: 3, amount: 2 })
            .await
            .unwrap();

        assert!(cart.is_empty());
        assert_eq!(h.storage.writes(), 0);
        assert!(h.notifier.notices().is_empty());
        stock.verify();
    }

    #[tokio::test]
    async fn test_update_amount() {
        let api = Arc::new(FakeApi::new().with_product(sneaker_catalog(), 5));
        let h = spawn(Cart::from_items(vec![sneaker(1)]).unwrap(), api.clone(), api);

        let cart = h
            .client
            .update_product_amount(UpdateProductAmount { product_id: 1, amount: 5 })
            .await
            .unwrap();

        assert_eq!(cart.items(), &[sneaker(5)]);
        assert_eq!(h.storage.writes(), 1);
    }

    #[tokio::test]
    async fn test_update_with_stock_failure_reports_generic_notice() {
        let mut stock = MockStock::new();
        stock.expect_fetch(1).return_err(ServiceError::Status {
            status: 500,
            url: "http://api/stock/1".into(),
        });
        let h = spawn(
            Cart::from_items(vec![sneaker(1)]).unwrap(),
            Arc::new(MockCatalog::new()),
            Arc::new(stock),
        );

        let result = h
            .client
            .update_product_amount(UpdateProductAmount { product_id: 1, amount: 2 })
            .await;

        assert!(result.is_err());
        assert_eq!(h.client.cart().amount_of(1), 1);
        assert_eq!(h.notifier.notices(), vec![Notice::UpdateFailed]);
    }
}
