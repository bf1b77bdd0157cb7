//! Order store: immutable purchase records.

use serde::{Deserialize, Serialize};
use storefront_commerce::order::{Order, OrderItem, PaymentStatus};
use storefront_commerce::{CustomerId, Money, OrderId, StoreError};
use tracing::info;

use crate::Db;

/// An order together with its lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderContents {
    /// The order record.
    pub order: Order,
    /// Its snapshotted lines.
    pub items: Vec<OrderItem>,
}

impl OrderContents {
    /// Sum of all line totals, `Overflow` if not representable.
    pub fn total(&self) -> Result<Money, StoreError> {
        self.items.iter().try_fold(Money::zero(), |acc, item| {
            let line = item.total()?;
            acc.try_add(line).ok_or(StoreError::Overflow)
        })
    }
}

/// Store for placed orders.
///
/// Orders are inserted only by the checkout workflow's transaction; this
/// store reads them and lets the external payment collaborator advance the
/// payment status.
#[derive(Debug, Clone)]
pub struct OrderStore {
    db: Db,
}

impl OrderStore {
    /// Create a store over the given database handle.
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Fetch an order and its lines.
    pub fn get_order(&self, id: &OrderId) -> Result<OrderContents, StoreError> {
        self.db.read(|t| {
            let order = t
                .orders
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::OrderNotFound(id.clone()))?;
            Ok(OrderContents {
                items: t.order_lines(id).to_vec(),
                order,
            })
        })
    }

    /// Orders placed by a customer, oldest first.
    pub fn list_for_customer(&self, customer: &CustomerId) -> Result<Vec<OrderContents>, StoreError> {
        self.db.read(|t| {
            let mut orders: Vec<OrderContents> = t
                .orders
                .values()
                .filter(|o| &o.customer == customer)
                .map(|o| OrderContents {
                    items: t.order_lines(&o.id).to_vec(),
                    order: o.clone(),
                })
                .collect();
            orders.sort_by_key(|c| c.order.placed_at);
            Ok(orders)
        })
    }

    /// Advance the payment status. Called by the payment collaborator after
    /// placement; line items stay untouched.
    pub fn set_payment_status(
        &self,
        id: &OrderId,
        status: PaymentStatus,
    ) -> Result<Order, StoreError> {
        self.db.transaction(|tx| {
            let order = tx
                .tables_mut()
                .orders
                .get_mut(id)
                .ok_or_else(|| StoreError::OrderNotFound(id.clone()))?;
            order.payment_status = status;
            info!(order = %id, status = status.as_str(), "payment status updated");
            Ok(order.clone())
        })
    }
}
