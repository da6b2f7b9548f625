use rust_decimal_macros::dec;
use std::sync::Arc;
use stockcart::application::config::CartConfig;
use stockcart::application::engine::{CartEngine, Outcome};
use stockcart::domain::ports::{
    NotificationSinkBox, PersistenceStoreBox, ProductCatalogBox, StockProviderBox,
};
use stockcart::domain::product::{Product, Stock};
use stockcart::infrastructure::in_memory::{InMemoryCatalog, InMemoryStore, RecordingNotifier};

fn catalog() -> InMemoryCatalog {
    let products = (1..=4)
        .map(|id| Product {
            id,
            title: format!("Sneaker {id}"),
            price: dec!(99.90),
            image: String::new(),
        })
        .collect();
    let stock = (1..=4).map(|id| Stock { id, amount: 10 }).collect();
    InMemoryCatalog::from_parts(products, stock)
}

#[tokio::test]
async fn test_engine_shared_across_tasks() {
    let catalog = catalog();
    let stock: StockProviderBox = Box::new(catalog.clone());
    let products: ProductCatalogBox = Box::new(catalog);
    let store: PersistenceStoreBox = Box::new(InMemoryStore::new());
    let notifier: NotificationSinkBox = Box::new(RecordingNotifier::new());

    let engine = Arc::new(CartEngine::new(
        CartConfig::default(),
        stock,
        products,
        store,
        notifier,
    ));

    // Verify Send + Sync by spawning tasks that all hit the same products
    let mut handles = Vec::new();
    for id in (1..=4).chain(1..=4) {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move { engine.add_product(id).await }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), Outcome::Committed);
    }

    let cart = engine.cart().await;
    assert_eq!(cart.len(), 4);
    assert!(cart.iter().all(|entry| entry.amount.get() == 2));
    assert_eq!(cart.item_count(), 8);
    assert_eq!(cart.total(), dec!(799.20));
}
