//! Storefront domain types.
//!
//! This crate holds the typed records behind the storefront backend:
//!
//! - **Catalog**: products and collections (read-mostly reference data)
//! - **Cart**: pre-purchase baskets and their line items
//! - **Order**: immutable purchase records with price-snapshot line items
//! - **Customer**: the customer directory records
//! - **Review**: product reviews
//!
//! Records are plain structs validated at construction; storage lives in
//! `storefront-db` and the checkout workflow in `storefront-checkout`.

pub mod cart;
pub mod catalog;
pub mod customer;
pub mod error;
pub mod ids;
pub mod money;
pub mod order;
pub mod review;

pub use error::{ErrorKind, StoreError};
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{ErrorKind, StoreError};
    pub use crate::ids::*;
    pub use crate::money::Money;

    pub use crate::cart::{Cart, CartItem, MAX_QUANTITY_PER_ITEM};
    pub use crate::catalog::{Collection, Product};
    pub use crate::customer::{Customer, Membership};
    pub use crate::order::{Order, OrderItem, PaymentStatus};
    pub use crate::review::Review;
}
