use super::product::Product;
use crate::error::CartError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub type ProductId = u32;

/// A strictly positive number of units.
///
/// Cart entries can never hold zero or negative quantities; the only way to
/// build one is through [`Quantity::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Self = Self(1);

    pub fn new(value: u32) -> Result<Self, CartError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(CartError::InvalidQuantity(
                "Quantity must be positive".to_string(),
            ))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CartError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// One product line in the cart.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CartEntry {
    pub id: ProductId,
    #[serde(alias = "name")]
    pub title: String,
    pub price: Decimal,
    #[serde(alias = "imageUrl", default)]
    pub image: String,
    pub amount: Quantity,
}

impl CartEntry {
    pub fn new(product: Product, amount: Quantity) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
        }
    }

    /// Price multiplied by the quantity held.
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.amount.get())
    }
}

/// Ordered collection of cart entries, unique by product id.
///
/// Entries keep the order in which their products were first added. The
/// serialized form is a plain JSON array; deserialization rejects duplicate
/// ids so a tampered snapshot can never break uniqueness.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartEntry>", into = "Vec<CartEntry>")]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<CartEntry>) -> Result<Self, CartError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(CartError::DuplicateEntry(entry.id));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Total number of units across all entries.
    pub fn item_count(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.amount.get()))
            .sum()
    }

    pub fn total(&self) -> Decimal {
        self.entries.iter().map(CartEntry::subtotal).sum()
    }

    /// Replaces the amount of an existing entry, keeping its position.
    ///
    /// Returns `false` when no entry has the given id.
    pub fn set_amount(&mut self, id: ProductId, amount: Quantity) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Appends a new entry at the end of the cart.
    pub fn append(&mut self, entry: CartEntry) -> Result<(), CartError> {
        if self.contains(entry.id) {
            return Err(CartError::DuplicateEntry(entry.id));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn remove(&mut self, id: ProductId) -> Option<CartEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }
}

impl TryFrom<Vec<CartEntry>> for Cart {
    type Error = CartError;

    fn try_from(entries: Vec<CartEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<Cart> for Vec<CartEntry> {
    fn from(cart: Cart) -> Self {
        cart.entries
    }
}
