//! # Mock Framework
//!
//! Utilities for testing the cart in isolation.
//!
//! - [`MockCatalog`] / [`MockStock`]: scripted services. Queue expectations with
//!   `expect_fetch(id).return_ok(..)` and check them with `verify()`.
//! - [`FakeApi`]: a small in-memory storefront for scenario tests where scripting
//!   every call would be noise.
//! - [`RecordingNotifier`]: remembers every notice emitted.
//! - [`create_mock_client`] plus the `expect_*` helpers: a [`CartClient`] whose
//!   requests land on a receiver you control, no actor involved.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

use crate::cart_actor::{CartReply, CartRequest, UpdateProductAmount};
use crate::clients::{CartClient, CatalogService, ServiceError, StockService};
use crate::model::{Cart, CatalogProduct, ProductId, Stock};
use crate::notice::{Notice, Notifier};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected lookup and the response to give back.
struct Expectation<T> {
    id: ProductId,
    response: Result<T, ServiceError>,
}

type Script<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn next_response<T>(script: &Script<T>, service: &str, id: ProductId) -> Result<T, ServiceError> {
    let expectation = script.lock().unwrap().pop_front();
    match expectation {
        Some(expectation) if expectation.id == id => expectation.response,
        Some(expectation) => panic!(
            "{service}: expected fetch of {}, got fetch of {id}",
            expectation.id
        ),
        None => panic!("{service}: unexpected fetch of {id}"),
    }
}

fn verify_script<T>(script: &Script<T>, service: &str) {
    let remaining = script.lock().unwrap().len();
    if remaining != 0 {
        panic!("{service}: not all expectations were met. {remaining} remaining");
    }
}

/// Builder for a single scripted lookup.
pub struct FetchExpectationBuilder<T> {
    id: ProductId,
    script: Script<T>,
}

impl<T> FetchExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.script.lock().unwrap().push_back(Expectation {
            id: self.id,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ServiceError) {
        self.script.lock().unwrap().push_back(Expectation {
            id: self.id,
            response: Err(error),
        });
    }
}

/// A catalog that answers from a script.
///
/// # Example
/// ```ignore
/// let mut catalog = MockCatalog::new();
/// catalog.expect_fetch(1).return_ok(Some(product));
/// catalog.expect_fetch(2).return_ok(None);
///
/// // Hand `Arc::new(catalog)` to the cart...
/// catalog.verify(); // Ensures all expectations were met
/// ```
#[derive(Default)]
pub struct MockCatalog {
    script: Script<Option<CatalogProduct>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `fetch_product` call for `id`.
    pub fn expect_fetch(&mut self, id: ProductId) -> FetchExpectationBuilder<Option<CatalogProduct>> {
        FetchExpectationBuilder {
            id,
            script: self.script.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        verify_script(&self.script, "MockCatalog");
    }
}

#[async_trait]
impl CatalogService for MockCatalog {
    async fn fetch_product(&self, id: ProductId) -> Result<Option<CatalogProduct>, ServiceError> {
        next_response(&self.script, "MockCatalog", id)
    }
}

/// A stock service that answers from a script.
#[derive(Default)]
pub struct MockStock {
    script: Script<Stock>,
}

impl MockStock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `fetch_stock` call for `id`.
    pub fn expect_fetch(&mut self, id: ProductId) -> FetchExpectationBuilder<Stock> {
        FetchExpectationBuilder {
            id,
            script: self.script.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        verify_script(&self.script, "MockStock");
    }
}

#[async_trait]
impl StockService for MockStock {
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, ServiceError> {
        next_response(&self.script, "MockStock", id)
    }
}

// =============================================================================
// FAKES
// =============================================================================

/// In-memory catalog and stock service.
///
/// Unknown products are absent from the catalog and make stock lookups fail
/// with a 404, like the real API.
#[derive(Default)]
pub struct FakeApi {
    products: Mutex<HashMap<ProductId, CatalogProduct>>,
    stock: Mutex<HashMap<ProductId, u32>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product with the given stock level.
    pub fn with_product(self, product: CatalogProduct, stock: u32) -> Self {
        self.set_stock(product.id, stock);
        self.products.lock().unwrap().insert(product.id, product);
        self
    }

    pub fn set_stock(&self, id: ProductId, amount: u32) {
        self.stock.lock().unwrap().insert(id, amount);
    }
}

#[async_trait]
impl CatalogService for FakeApi {
    async fn fetch_product(&self, id: ProductId) -> Result<Option<CatalogProduct>, ServiceError> {
        Ok(self.products.lock().unwrap().get(&id).cloned())
    }
}

#[async_trait]
impl StockService for FakeApi {
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, ServiceError> {
        match self.stock.lock().unwrap().get(&id) {
            Some(amount) => Ok(Stock::new(id, *amount)),
            None => Err(ServiceError::Status {
                status: 404,
                url: format!("fake://stock/{id}"),
            }),
        }
    }
}

/// Collects every notice it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

// =============================================================================
// CLIENT HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// # Testing Strategy
/// To test the *client* we don't need a running actor. The returned receiver
/// plays the actor: pull the next request with one of the `expect_*` helpers,
/// assert on it, and answer through its reply channel.
pub fn create_mock_client(buffer_size: usize, snapshot: Cart) -> (CartClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_, snapshot) = watch::channel(snapshot);
    (CartClient::new(sender, snapshot), receiver)
}

/// Helper to verify that the next message is an AddProduct request
pub async fn expect_add_product(receiver: &mut mpsc::Receiver<CartRequest>) -> Option<(ProductId, CartReply)> {
    match receiver.recv().await {
        Some(CartRequest::AddProduct { product_id, respond_to }) => Some((product_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a RemoveProduct request
pub async fn expect_remove_product(receiver: &mut mpsc::Receiver<CartRequest>) -> Option<(ProductId, CartReply)> {
    match receiver.recv().await {
        Some(CartRequest::RemoveProduct { product_id, respond_to }) => Some((product_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an UpdateProductAmount request
pub async fn expect_update_product_amount(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(UpdateProductAmount, CartReply)> {
    match receiver.recv().await {
        Some(CartRequest::UpdateProductAmount { update, respond_to }) => Some((update, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_catalog_with_expectations() {
        let mut catalog = MockCatalog::new();
        catalog.expect_fetch(1).return_ok(None);
        catalog
            .expect_fetch(2)
            .return_err(ServiceError::Request("timeout".into()));

        assert_eq!(catalog.fetch_product(1).await, Ok(None));
        assert!(catalog.fetch_product(2).await.is_err());

        catalog.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "not all expectations were met")]
    async fn test_verify_reports_unmet_expectations() {
        let mut stock = MockStock::new();
        stock.expect_fetch(1).return_ok(Stock::new(1, 3));

        stock.verify();
    }

    #[tokio::test]
    async fn test_fake_api() {
        let api = FakeApi::new().with_product(
            CatalogProduct {
                id: 3,
                title: "Sandal".into(),
                price: 49.9,
                image: "https://img/3.jpg".into(),
            },
            2,
        );

        assert!(api.fetch_product(3).await.unwrap().is_some());
        assert_eq!(api.fetch_product(4).await, Ok(None));
        assert_eq!(api.fetch_stock(3).await, Ok(Stock::new(3, 2)));
        assert!(matches!(
            api.fetch_stock(4).await,
            Err(ServiceError::Status { status: 404, .. })
        ));

        api.set_stock(3, 0);
        assert_eq!(api.fetch_stock(3).await, Ok(Stock::new(3, 0)));
    }
}
