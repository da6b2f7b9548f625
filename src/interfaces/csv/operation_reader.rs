use crate::application::engine::{CartEngine, Outcome, UpdateProductAmount};
use crate::domain::cart::ProductId;
use crate::error::{CartError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Add,
    Remove,
    Update,
}

/// One row of an operations file: `type, product, amount`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CartOperation {
    pub r#type: OperationType,
    pub product: ProductId,
    pub amount: Option<i64>,
}

impl CartOperation {
    /// Runs the operation against `engine`.
    pub async fn apply(&self, engine: &CartEngine) -> Result<Outcome> {
        match self.r#type {
            OperationType::Add => engine.add_product(self.product).await,
            OperationType::Remove => engine.remove_product(self.product).await,
            OperationType::Update => {
                let amount = self.amount.ok_or_else(|| {
                    CartError::InvalidQuantity("update requires an amount".to_string())
                })?;
                engine
                    .update_product_amount(UpdateProductAmount {
                        product_id: self.product,
                        amount,
                    })
                    .await
            }
        }
    }
}

/// Reads cart operations from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<CartOperation>`.
/// It handles whitespace trimming and flexible record lengths automatically.
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OperationReader<R> {
    /// Creates a new `OperationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes operations.
    pub fn operations(self) -> impl Iterator<Item = Result<CartOperation>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CartError::from))
    }
}
