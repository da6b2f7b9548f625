/// Key under which the cart snapshot is stored when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "stockcart:cart";

/// Settings for a [`CartEngine`](super::engine::CartEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Persistence key holding the serialized cart.
    pub storage_key: String,
}

impl CartConfig {
    pub fn with_storage_key(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self::with_storage_key(DEFAULT_STORAGE_KEY)
    }
}
