//! Catalog store: products and collections.

use storefront_commerce::catalog::{Collection, Product};
use storefront_commerce::{CollectionId, Money, ProductId, StoreError};
use tracing::debug;

use crate::Db;

/// Read-mostly store for products and collections.
///
/// Products are mutated by administrative operations only; the cart and
/// checkout paths read them for existence and current-price checks.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    db: Db,
}

impl CatalogStore {
    /// Create a store over the given database handle.
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Insert a product. The collection it references must exist.
    pub fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        self.db.transaction(|tx| {
            let t = tx.tables_mut();
            if !t.collections.contains_key(&product.collection) {
                return Err(StoreError::CollectionNotFound(product.collection.clone()));
            }
            debug!(product = %product.id, title = %product.title, "product inserted");
            t.products.insert(product.id.clone(), product);
            Ok(())
        })
    }

    /// Fetch a product by id.
    pub fn get_product(&self, id: &ProductId) -> Result<Product, StoreError> {
        self.db.read(|t| {
            t.products
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::ProductNotFound(id.clone()))
        })
    }

    /// Whether a product exists.
    pub fn product_exists(&self, id: &ProductId) -> Result<bool, StoreError> {
        self.db.read(|t| Ok(t.products.contains_key(id)))
    }

    /// All products, ordered by title.
    pub fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        self.db.read(|t| {
            let mut products: Vec<Product> = t.products.values().cloned().collect();
            products.sort_by(|a, b| a.title.cmp(&b.title));
            Ok(products)
        })
    }

    /// Administrative price change. Existing order lines keep the price they
    /// captured at checkout.
    pub fn set_unit_price(&self, id: &ProductId, unit_price: Money) -> Result<(), StoreError> {
        self.db.transaction(|tx| {
            let product = tx
                .tables_mut()
                .products
                .get_mut(id)
                .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;
            product.set_unit_price(unit_price)?;
            debug!(product = %id, price = %unit_price, "unit price updated");
            Ok(())
        })
    }

    /// Delete a product. Cart lines referencing it are cascade-deleted;
    /// a product referenced by an order line is protected.
    pub fn delete_product(&self, id: &ProductId) -> Result<(), StoreError> {
        self.db.transaction(|tx| {
            let t = tx.tables_mut();
            if !t.products.contains_key(id) {
                return Err(StoreError::ProductNotFound(id.clone()));
            }
            if t.product_has_order_lines(id) {
                return Err(StoreError::ProductInUse(id.clone()));
            }
            t.products.remove(id);
            for lines in t.cart_items.values_mut() {
                lines.retain(|line| &line.product_id != id);
            }
            t.cart_items.retain(|_, lines| !lines.is_empty());
            t.reviews.retain(|_, review| &review.product_id != id);
            debug!(product = %id, "product deleted");
            Ok(())
        })
    }

    /// Insert a collection.
    pub fn insert_collection(&self, collection: Collection) -> Result<(), StoreError> {
        self.db.transaction(|tx| {
            tx.tables_mut()
                .collections
                .insert(collection.id.clone(), collection);
            Ok(())
        })
    }

    /// Fetch a collection by id.
    pub fn get_collection(&self, id: &CollectionId) -> Result<Collection, StoreError> {
        self.db.read(|t| {
            t.collections
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::CollectionNotFound(id.clone()))
        })
    }

    /// All collections, ordered by title.
    pub fn list_collections(&self) -> Result<Vec<Collection>, StoreError> {
        self.db.read(|t| {
            let mut collections: Vec<Collection> = t.collections.values().cloned().collect();
            collections.sort_by(|a, b| a.title.cmp(&b.title));
            Ok(collections)
        })
    }

    /// Delete a collection. A collection that still contains products is
    /// protected.
    pub fn delete_collection(&self, id: &CollectionId) -> Result<(), StoreError> {
        self.db.transaction(|tx| {
            let t = tx.tables_mut();
            if !t.collections.contains_key(id) {
                return Err(StoreError::CollectionNotFound(id.clone()));
            }
            if t.products.values().any(|p| &p.collection == id) {
                return Err(StoreError::CollectionInUse(id.clone()));
            }
            t.collections.remove(id);
            Ok(())
        })
    }
}
