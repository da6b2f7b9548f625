use crate::domain::cart::ProductId;
use thiserror::Error;

/// Failure reported by a stock or catalog provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("product {0} not found")]
    NotFound(ProductId),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("catalog returned product {returned} for request {requested}")]
    Mismatch {
        requested: ProductId,
        returned: ProductId,
    },
}

#[derive(Error, Debug)]
pub enum CartError {
    #[error("product {0} is not in the cart")]
    NotFound(ProductId),
    #[error("requested {requested} of product {product_id}, only {available} in stock")]
    StockExceeded {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },
    #[error("external failure: {0}")]
    External(#[from] ProviderError),
    #[error("persistence error: {0}")]
    Persistence(#[from] std::io::Error),
    #[error("snapshot codec error: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("product {0} appears more than once")]
    DuplicateEntry(ProductId),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Coarse classification of a [`CartError`], used to pick user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    StockExceeded,
    ExternalFailure,
    Persistence,
    Invalid,
}

impl CartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::NotFound(_) => ErrorKind::NotFound,
            CartError::StockExceeded { .. } => ErrorKind::StockExceeded,
            CartError::External(_) => ErrorKind::ExternalFailure,
            CartError::Persistence(_) | CartError::Codec(_) => ErrorKind::Persistence,
            CartError::InvalidQuantity(_) | CartError::DuplicateEntry(_) | CartError::Csv(_) => {
                ErrorKind::Invalid
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;
