//! JSON codec for the persisted cart snapshot.

use crate::domain::cart::Cart;
use crate::domain::ports::PersistenceStore;
use crate::error::Result;
use tracing::{debug, warn};

pub fn encode(cart: &Cart) -> Result<String> {
    Ok(serde_json::to_string(cart)?)
}

pub fn decode(raw: &str) -> Result<Cart> {
    Ok(serde_json::from_str(raw)?)
}

/// Reads the snapshot stored under `key`.
///
/// A missing, unreadable or invalid snapshot yields an empty cart.
pub fn restore(store: &dyn PersistenceStore, key: &str) -> Cart {
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no cart snapshot found");
            return Cart::new();
        }
        Err(e) => {
            warn!(key, error = %e, "failed to load cart snapshot, starting empty");
            return Cart::new();
        }
    };

    match decode(&raw) {
        Ok(cart) => {
            debug!(key, entries = cart.len(), "restored cart snapshot");
            cart
        }
        Err(e) => {
            warn!(key, error = %e, "discarding corrupt cart snapshot");
            Cart::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::{CartEntry, Quantity};
    use crate::infrastructure::in_memory::InMemoryStore;
    use rust_decimal_macros::dec;

    fn sample_cart() -> Cart {
        Cart::from_entries(vec![
            CartEntry {
                id: 2,
                title: "Trail Runner".to_string(),
                price: dec!(139.90),
                image: "https://img/2.png".to_string(),
                amount: Quantity::new(3).unwrap(),
            },
            CartEntry {
                id: 1,
                title: "Street Low".to_string(),
                price: dec!(179.9),
                image: String::new(),
                amount: Quantity::ONE,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_round_trip_through_store() {
        let store = InMemoryStore::new();
        let cart = sample_cart();

        store.save("cart", &encode(&cart).unwrap()).unwrap();
        let restored = restore(&store, "cart");

        assert_eq!(restored, cart);
        assert_eq!(restored.entries()[0].id, 2);
    }

    #[test]
    fn test_encoded_format_is_flat_array() {
        let raw = encode(&sample_cart()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["id"], 2);
        assert_eq!(first["amount"], 3);
        assert_eq!(first["price"], "139.90");
    }

    #[test]
    fn test_decode_accepts_numeric_price() {
        let raw = r#"[{"id": 1, "title": "Tênis", "price": 179.9, "image": "x", "amount": 2}]"#;
        let cart = decode(raw).unwrap();

        let entry = cart.get(1).unwrap();
        assert_eq!(entry.price, dec!(179.9));
        assert_eq!(entry.amount.get(), 2);
        assert_eq!(entry.subtotal(), dec!(359.8));
    }

    #[test]
    fn test_restore_missing_key_is_empty() {
        let store = InMemoryStore::new();
        assert!(restore(&store, "cart").is_empty());
    }

    #[test]
    fn test_restore_corrupt_snapshot_is_empty() {
        let store = InMemoryStore::new();
        store.save("cart", "{not json").unwrap();
        assert!(restore(&store, "cart").is_empty());

        let duplicated = r#"[
            {"id": 1, "title": "a", "price": "1", "amount": 1},
            {"id": 1, "title": "a", "price": "1", "amount": 2}
        ]"#;
        store.save("cart", duplicated).unwrap();
        assert!(restore(&store, "cart").is_empty());
    }
}
