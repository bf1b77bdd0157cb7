//! Application configuration.

use serde::Deserialize;
use storefront_commerce::cart::MAX_QUANTITY_PER_ITEM;
use storefront_commerce::StoreError;

/// Configuration for a storefront instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store display name, used in logs.
    pub name: String,
    /// Whether checkout notifications are delivered to registered listeners.
    pub notifications: bool,
    /// Per-line quantity ceiling enforced at the API boundary. May be set
    /// below the domain ceiling but never takes effect above it.
    pub max_line_quantity: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "storefront".to_string(),
            notifications: true,
            max_line_quantity: MAX_QUANTITY_PER_ITEM,
        }
    }
}

impl StoreConfig {
    /// Create a configuration with the given store name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Enable or disable checkout notifications.
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications = enabled;
        self
    }

    /// Lower the per-line quantity ceiling.
    pub fn with_max_line_quantity(mut self, quantity: i64) -> Self {
        self.max_line_quantity = quantity;
        self
    }

    /// Parse a configuration from a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, StoreError> {
        toml::from_str(source).map_err(|e| StoreError::InvalidBody(e.to_string()))
    }
}
