//! Storage error types.

use storefront_commerce::StoreError;
use thiserror::Error;

/// Errors that can occur in the storage layer.
#[derive(Error, Debug)]
pub enum DbError {
    /// A writer panicked while holding the lock; the tables may not be
    /// consistent and no further transaction is attempted against them.
    #[error("storage lock poisoned by a panicked writer")]
    Poisoned,
}

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        StoreError::TransactionAborted(e.to_string())
    }
}
