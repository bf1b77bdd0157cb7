//! Review store.

use storefront_commerce::review::Review;
use storefront_commerce::{ProductId, ReviewId, StoreError};

use crate::Db;

/// Store for product reviews.
#[derive(Debug, Clone)]
pub struct ReviewStore {
    db: Db,
}

impl ReviewStore {
    /// Create a store over the given database handle.
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Post a review against an existing product.
    pub fn add_review(
        &self,
        product_id: &ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Review, StoreError> {
        let review = Review::new(product_id.clone(), name, description);
        self.db.transaction(|tx| {
            let t = tx.tables_mut();
            if !t.products.contains_key(product_id) {
                return Err(StoreError::ProductNotFound(product_id.clone()));
            }
            t.reviews.insert(review.id.clone(), review.clone());
            Ok(review.clone())
        })
    }

    /// Reviews for a product, oldest first.
    pub fn list_for_product(&self, product_id: &ProductId) -> Result<Vec<Review>, StoreError> {
        self.db.read(|t| {
            if !t.products.contains_key(product_id) {
                return Err(StoreError::ProductNotFound(product_id.clone()));
            }
            let mut reviews: Vec<Review> = t
                .reviews
                .values()
                .filter(|r| &r.product_id == product_id)
                .cloned()
                .collect();
            reviews.sort_by_key(|r| r.date);
            Ok(reviews)
        })
    }

    /// Delete a review.
    pub fn delete_review(&self, id: &ReviewId) -> Result<(), StoreError> {
        self.db.transaction(|tx| {
            if tx.tables_mut().reviews.remove(id).is_none() {
                return Err(StoreError::ReviewNotFound(id.clone()));
            }
            Ok(())
        })
    }
}
