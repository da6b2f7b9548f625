use super::cart::ProductId;
use super::product::{Product, Stock};
use crate::error::ProviderError;
use async_trait::async_trait;
use std::io;

/// Source of truth for how many units of a product can be bought.
#[async_trait]
pub trait StockProvider: Send + Sync {
    async fn fetch_stock(&self, product_id: ProductId) -> Result<Stock, ProviderError>;
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn fetch_product(&self, product_id: ProductId) -> Result<Product, ProviderError>;
}

/// Synchronous key-value storage for raw cart snapshots.
pub trait PersistenceStore: Send + Sync {
    fn load(&self, key: &str) -> io::Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> io::Result<()>;
}

/// Fire-and-forget channel for user-facing outcome messages.
pub trait NotificationSink: Send + Sync {
    fn notify_success(&self, message: &str);
    fn notify_error(&self, message: &str);
}

pub type StockProviderBox = Box<dyn StockProvider>;
pub type ProductCatalogBox = Box<dyn ProductCatalog>;
pub type PersistenceStoreBox = Box<dyn PersistenceStore>;
pub type NotificationSinkBox = Box<dyn NotificationSink>;
