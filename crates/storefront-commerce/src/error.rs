//! Storefront error types.

use crate::ids::{CartId, CollectionId, CustomerId, OrderId, ProductId, ReviewId, UserId};
use crate::money::Money;
use thiserror::Error;

/// Coarse classification of a [`StoreError`].
///
/// The API layer maps each kind to a response status; callers that only care
/// whether a failure is retryable or a bad request can branch on this instead
/// of the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced record does not exist.
    NotFound,
    /// The operation is valid but the current state forbids it.
    FailedPrecondition,
    /// The caller supplied an invalid value.
    InvalidArgument,
    /// The storage layer failed mid-transaction; nothing was committed.
    TransactionAborted,
}

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Product not found.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// Collection not found.
    #[error("collection not found: {0}")]
    CollectionNotFound(CollectionId),

    /// Cart not found.
    #[error("cart not found: {0}")]
    CartNotFound(CartId),

    /// Cart line for the given product not found.
    #[error("cart {cart} has no line for product {product}")]
    CartItemNotFound {
        /// Cart being addressed.
        cart: CartId,
        /// Product the missing line refers to.
        product: ProductId,
    },

    /// Order not found.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// Customer not found.
    #[error("customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// No customer record for the given user.
    #[error("no customer for user: {0}")]
    CustomerNotFoundForUser(UserId),

    /// Review not found.
    #[error("review not found: {0}")]
    ReviewNotFound(ReviewId),

    /// Checkout attempted on a cart with no items.
    #[error("empty cart: {0}")]
    EmptyCart(CartId),

    /// Product cannot be deleted while orders reference it.
    #[error("product {0} is referenced by existing orders")]
    ProductInUse(ProductId),

    /// Collection cannot be deleted while products reference it.
    #[error("collection {0} still contains products")]
    CollectionInUse(CollectionId),

    /// Quantity must be at least 1.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds the per-line ceiling.
    #[error("quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Unit price below the minimum representable price.
    #[error("unit price must be at least $0.01, got {0}")]
    InvalidPrice(Money),

    /// Inventory count must be non-negative.
    #[error("inventory must be non-negative, got {0}")]
    InvalidInventory(i64),

    /// Arithmetic overflow in a money calculation.
    #[error("arithmetic overflow in money calculation")]
    Overflow,

    /// A request body failed validation or deserialization.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The storage layer failed during a transaction. Nothing was committed;
    /// the pre-transaction state is intact.
    #[error("transaction aborted: {0}")]
    TransactionAborted(String),
}

impl StoreError {
    /// Classify this error into the coarse taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::ProductNotFound(_)
            | StoreError::CollectionNotFound(_)
            | StoreError::CartNotFound(_)
            | StoreError::CartItemNotFound { .. }
            | StoreError::OrderNotFound(_)
            | StoreError::CustomerNotFound(_)
            | StoreError::CustomerNotFoundForUser(_)
            | StoreError::ReviewNotFound(_) => ErrorKind::NotFound,
            StoreError::EmptyCart(_)
            | StoreError::ProductInUse(_)
            | StoreError::CollectionInUse(_) => ErrorKind::FailedPrecondition,
            StoreError::InvalidQuantity(_)
            | StoreError::QuantityExceedsLimit(_, _)
            | StoreError::InvalidPrice(_)
            | StoreError::InvalidInventory(_)
            | StoreError::Overflow
            | StoreError::InvalidBody(_) => ErrorKind::InvalidArgument,
            StoreError::TransactionAborted(_) => ErrorKind::TransactionAborted,
        }
    }
}
