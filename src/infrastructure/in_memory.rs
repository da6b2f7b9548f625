use crate::domain::cart::ProductId;
use crate::domain::ports::{NotificationSink, PersistenceStore, ProductCatalog, StockProvider};
use crate::domain::product::{Product, Stock};
use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::{self, Read};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

/// A thread-safe in-memory key-value store for cart snapshots.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the engine wrote.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceStore for InMemoryStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|_| io::Error::other("store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| io::Error::other("store lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct CatalogState {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, u32>,
    fail_stock: bool,
    fail_products: bool,
}

/// On-disk shape of a catalog fixture: the `products` and `stock`
/// collections of a json-server database.
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    stock: Vec<Stock>,
}

/// An in-memory product catalog that also answers stock queries.
///
/// Lookups can be forced to fail and delayed, which lets tests exercise the
/// engine's failure paths and overlapping calls without a network.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    state: Arc<tokio::sync::RwLock<CatalogState>>,
    latency: Option<Duration>,
}

impl InMemoryCatalog {
    /// Creates a new, empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(products: Vec<Product>, stock: Vec<Stock>) -> Self {
        let state = CatalogState {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            stock: stock.into_iter().map(|s| (s.id, s.amount)).collect(),
            ..CatalogState::default()
        };
        Self {
            state: Arc::new(tokio::sync::RwLock::new(state)),
            latency: None,
        }
    }

    /// Loads a JSON fixture of the form `{"products": [...], "stock": [...]}`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let fixture: CatalogFixture = serde_json::from_reader(reader)?;
        Ok(Self::from_parts(fixture.products, fixture.stock))
    }

    /// Delays every lookup by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn insert_product(&self, product: Product) {
        let mut state = self.state.write().await;
        state.products.insert(product.id, product);
    }

    pub async fn set_stock(&self, product_id: ProductId, amount: u32) {
        let mut state = self.state.write().await;
        state.stock.insert(product_id, amount);
    }

    pub async fn fail_stock_lookups(&self, fail: bool) {
        self.state.write().await.fail_stock = fail;
    }

    pub async fn fail_product_lookups(&self, fail: bool) {
        self.state.write().await.fail_products = fail;
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl StockProvider for InMemoryCatalog {
    async fn fetch_stock(
        &self,
        product_id: ProductId,
    ) -> std::result::Result<Stock, ProviderError> {
        self.simulate_latency().await;

        let state = self.state.read().await;
        if state.fail_stock {
            return Err(ProviderError::Transport(
                "simulated stock lookup failure".to_string(),
            ));
        }
        state
            .stock
            .get(&product_id)
            .map(|&amount| Stock {
                id: product_id,
                amount,
            })
            .ok_or(ProviderError::NotFound(product_id))
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn fetch_product(
        &self,
        product_id: ProductId,
    ) -> std::result::Result<Product, ProviderError> {
        self.simulate_latency().await;

        let state = self.state.read().await;
        if state.fail_products {
            return Err(ProviderError::Transport(
                "simulated product lookup failure".to_string(),
            ));
        }
        state
            .products
            .get(&product_id)
            .cloned()
            .ok_or(ProviderError::NotFound(product_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// A notification sink that keeps every message it receives.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notifications received so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn push(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notification);
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify_success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }
}
