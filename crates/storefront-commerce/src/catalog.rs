//! Catalog types: products and collections.
//!
//! Read-mostly reference data owned by the catalog store. Products are
//! mutated by administrative operations only; the checkout workflow reads
//! them for existence and current-price checks.

use crate::error::StoreError;
use crate::ids::{CollectionId, ProductId};
use crate::money::{Money, MIN_UNIT_PRICE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Current unit price. Orders snapshot this at checkout time.
    pub unit_price: Money,
    /// Units in stock. Not decremented by checkout.
    pub inventory: i64,
    /// Collection this product belongs to.
    pub collection: CollectionId,
    /// When the product was last modified.
    pub last_update: DateTime<Utc>,
}

impl Product {
    /// Create a new product, validating price and inventory.
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        unit_price: Money,
        inventory: i64,
        collection: CollectionId,
    ) -> Result<Self, StoreError> {
        if unit_price < MIN_UNIT_PRICE {
            return Err(StoreError::InvalidPrice(unit_price));
        }
        if inventory < 0 {
            return Err(StoreError::InvalidInventory(inventory));
        }
        Ok(Self {
            id: ProductId::generate(),
            title: title.into(),
            slug: slug.into(),
            description: None,
            unit_price,
            inventory,
            collection,
            last_update: Utc::now(),
        })
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the unit price, validating it.
    pub fn set_unit_price(&mut self, unit_price: Money) -> Result<(), StoreError> {
        if unit_price < MIN_UNIT_PRICE {
            return Err(StoreError::InvalidPrice(unit_price));
        }
        self.unit_price = unit_price;
        self.last_update = Utc::now();
        Ok(())
    }

    /// Check whether any stock is recorded.
    pub fn in_stock(&self) -> bool {
        self.inventory > 0
    }
}

/// A named grouping of products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    /// Unique collection identifier.
    pub id: CollectionId,
    /// Display title.
    pub title: String,
    /// Optionally highlighted product.
    pub featured_product: Option<ProductId>,
}

impl Collection {
    /// Create a new collection.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: CollectionId::generate(),
            title: title.into(),
            featured_product: None,
        }
    }

    /// Set the featured product.
    pub fn with_featured_product(mut self, product: ProductId) -> Self {
        self.featured_product = Some(product);
        self
    }
}
