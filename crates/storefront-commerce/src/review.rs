//! Product reviews.

use crate::ids::{ProductId, ReviewId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer review attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Unique review identifier.
    pub id: ReviewId,
    /// Product being reviewed.
    pub product_id: ProductId,
    /// Reviewer display name.
    pub name: String,
    /// Review body.
    pub description: String,
    /// When the review was posted.
    pub date: DateTime<Utc>,
}

impl Review {
    /// Create a new review posted now.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ReviewId::generate(),
            product_id,
            name: name.into(),
            description: description.into(),
            date: Utc::now(),
        }
    }
}
