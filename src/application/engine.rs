use crate::application::config::CartConfig;
use crate::application::messages::{self, Operation};
use crate::application::snapshot;
use crate::domain::cart::{Cart, CartEntry, ProductId, Quantity};
use crate::domain::ports::{
    NotificationSinkBox, PersistenceStoreBox, ProductCatalogBox, StockProviderBox,
};
use crate::error::{CartError, ProviderError, Result};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

/// What a successful operation did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new cart was persisted and became the in-memory state.
    Committed,
    /// The request was a no-op (non-positive update amount).
    Ignored,
}

/// Request to set the exact quantity of a cart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// The owner of the cart.
///
/// `CartEngine` validates every mutation against the stock provider, writes
/// the resulting cart to the persistence store and only then swaps it into
/// memory. A failed validation or a failed write leaves the committed cart
/// untouched.
///
/// Mutations are serialized: each one holds the mutation lock from the moment
/// it copies the committed cart until it commits or gives up, so two
/// overlapping calls never compute from the same stale working copy. Readers
/// only take the state lock for the duration of a clone.
pub struct CartEngine {
    stock: StockProviderBox,
    catalog: ProductCatalogBox,
    store: PersistenceStoreBox,
    notifier: NotificationSinkBox,
    storage_key: String,
    cart: RwLock<Cart>,
    mutation: Mutex<()>,
}

impl CartEngine {
    /// Creates a new `CartEngine`, restoring the cart persisted under the
    /// configured key.
    ///
    /// # Arguments
    ///
    /// * `config` - Engine settings (storage key).
    /// * `stock` - Source of available quantities.
    /// * `catalog` - Source of product metadata for new entries.
    /// * `store` - Key-value store holding the cart snapshot.
    /// * `notifier` - Sink receiving user-facing outcome messages.
    pub fn new(
        config: CartConfig,
        stock: StockProviderBox,
        catalog: ProductCatalogBox,
        store: PersistenceStoreBox,
        notifier: NotificationSinkBox,
    ) -> Self {
        let cart = snapshot::restore(store.as_ref(), &config.storage_key);
        info!(
            key = %config.storage_key,
            entries = cart.len(),
            "cart engine ready"
        );

        Self {
            stock,
            catalog,
            store,
            notifier,
            storage_key: config.storage_key,
            cart: RwLock::new(cart),
            mutation: Mutex::new(()),
        }
    }

    /// Returns a snapshot of the committed cart.
    pub async fn cart(&self) -> Cart {
        self.cart.read().await.clone()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Consumes the engine and returns the committed cart.
    pub fn into_cart(self) -> Cart {
        self.cart.into_inner()
    }

    /// Adds one unit of `product_id`, appending a new entry if the product is
    /// not in the cart yet.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<Outcome> {
        let result = self.try_add_product(product_id).await;
        self.report(Operation::Add, &result);
        result
    }

    /// Removes the entry for `product_id`.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Outcome> {
        let result = self.try_remove_product(product_id).await;
        self.report(Operation::Remove, &result);
        result
    }

    /// Sets the exact quantity of an existing entry.
    ///
    /// Non-positive amounts are ignored without touching the providers or
    /// the store.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&self, request: UpdateProductAmount) -> Result<Outcome> {
        if request.amount <= 0 {
            debug!(amount = request.amount, "ignoring non-positive amount");
            return Ok(Outcome::Ignored);
        }

        let result = self.try_update_product_amount(request).await;
        self.report(Operation::UpdateAmount, &result);
        result
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<Outcome> {
        let _guard = self.mutation.lock().await;
        let mut working = self.cart.read().await.clone();

        let current = working.get(product_id).map_or(0, |entry| entry.amount.get());
        let stock = self.stock.fetch_stock(product_id).await?;

        let requested = u64::from(current) + 1;
        if requested > u64::from(stock.amount) {
            return Err(CartError::StockExceeded {
                product_id,
                requested,
                available: stock.amount,
            });
        }
        // current < stock.amount here, so the increment cannot overflow.
        let amount = Quantity::new(current + 1)?;

        if !working.set_amount(product_id, amount) {
            let product = self.catalog.fetch_product(product_id).await?;
            if product.id != product_id {
                return Err(ProviderError::Mismatch {
                    requested: product_id,
                    returned: product.id,
                }
                .into());
            }
            working.append(CartEntry::new(product, amount))?;
        }

        self.commit(working).await
    }

    async fn try_remove_product(&self, product_id: ProductId) -> Result<Outcome> {
        let _guard = self.mutation.lock().await;
        let mut working = self.cart.read().await.clone();

        if working.remove(product_id).is_none() {
            return Err(CartError::NotFound(product_id));
        }

        self.commit(working).await
    }

    async fn try_update_product_amount(&self, request: UpdateProductAmount) -> Result<Outcome> {
        let UpdateProductAmount { product_id, amount } = request;
        let _guard = self.mutation.lock().await;

        let stock = self.stock.fetch_stock(product_id).await?;
        let mut working = self.cart.read().await.clone();

        if !working.contains(product_id) {
            return Err(CartError::NotFound(product_id));
        }

        let requested = u64::try_from(amount).unwrap_or(0);
        if requested > u64::from(stock.amount) {
            return Err(CartError::StockExceeded {
                product_id,
                requested,
                available: stock.amount,
            });
        }
        let amount = u32::try_from(requested)
            .map_err(|e| CartError::InvalidQuantity(e.to_string()))
            .and_then(Quantity::new)?;

        working.set_amount(product_id, amount);
        self.commit(working).await
    }

    /// Persists `next` and, once the write succeeded, makes it the committed
    /// cart.
    async fn commit(&self, next: Cart) -> Result<Outcome> {
        let raw = snapshot::encode(&next)?;
        self.store.save(&self.storage_key, &raw)?;

        let entries = next.len();
        *self.cart.write().await = next;
        debug!(entries, "cart committed");

        Ok(Outcome::Committed)
    }

    fn report(&self, operation: Operation, result: &Result<Outcome>) {
        match result {
            Ok(Outcome::Committed) => {
                info!(?operation, "cart updated");
                if let Some(message) = messages::success_message(operation) {
                    self.notifier.notify_success(message);
                }
            }
            Ok(Outcome::Ignored) => {}
            Err(e) => {
                warn!(?operation, kind = ?e.kind(), error = %e, "cart operation rejected");
                self.notifier
                    .notify_error(messages::failure_message(operation, e));
            }
        }
    }
}
