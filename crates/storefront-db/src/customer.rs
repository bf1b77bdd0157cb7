//! Customer directory.

use storefront_commerce::customer::Customer;
use storefront_commerce::{CustomerId, StoreError, UserId};

use crate::Db;

/// Lookup-oriented store for customer records.
///
/// The checkout workflow resolves customers through this directory; it never
/// creates them.
#[derive(Debug, Clone)]
pub struct CustomerDirectory {
    db: Db,
}

impl CustomerDirectory {
    /// Create a directory over the given database handle.
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Insert a customer record.
    pub fn insert(&self, customer: Customer) -> Result<(), StoreError> {
        self.db.transaction(|tx| {
            tx.tables_mut()
                .customers
                .insert(customer.id.clone(), customer);
            Ok(())
        })
    }

    /// Fetch a customer by id.
    pub fn get(&self, id: &CustomerId) -> Result<Customer, StoreError> {
        self.db.read(|t| {
            t.customers
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::CustomerNotFound(id.clone()))
        })
    }

    /// Resolve the customer belonging to an authentication-side user.
    pub fn get_by_user_id(&self, user: &UserId) -> Result<Customer, StoreError> {
        self.db.read(|t| {
            t.customers
                .values()
                .find(|c| &c.user_id == user)
                .cloned()
                .ok_or_else(|| StoreError::CustomerNotFoundForUser(user.clone()))
        })
    }
}
