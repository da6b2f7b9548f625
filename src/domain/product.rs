use super::cart::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product metadata as served by the catalog.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Product {
    pub id: ProductId,
    #[serde(alias = "name")]
    pub title: String,
    pub price: Decimal,
    #[serde(alias = "imageUrl", default)]
    pub image: String,
}

/// Units of a product currently available for purchase.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}
