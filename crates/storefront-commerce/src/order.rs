//! Order types.
//!
//! Orders are created exactly once per successful checkout and are immutable
//! apart from their payment status, which an external payment collaborator
//! advances. Order items snapshot the product's unit price at checkout time;
//! later price changes never affect them.

use crate::error::StoreError;
use crate::ids::{CustomerId, OrderId, ProductId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    /// Payment not yet collected.
    #[default]
    Pending,
    /// Payment collected.
    Completed,
    /// Payment attempt failed.
    Failed,
}

impl PaymentStatus {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
        }
    }
}

/// A purchase record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Payment status, advanced externally after placement.
    pub payment_status: PaymentStatus,
    /// Customer who placed the order.
    pub customer: CustomerId,
}

impl Order {
    /// Create a new pending order placed now.
    pub fn new(customer: CustomerId) -> Self {
        Self {
            id: OrderId::generate(),
            placed_at: Utc::now(),
            payment_status: PaymentStatus::Pending,
            customer,
        }
    }
}

/// A priced, quantity-fixed line belonging to an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Owning order.
    pub order_id: OrderId,
    /// Product purchased.
    pub product_id: ProductId,
    /// Units purchased.
    pub quantity: i64,
    /// Unit price captured at checkout time.
    pub unit_price: Money,
}

impl OrderItem {
    /// Line total (unit price times quantity), `Overflow` if not
    /// representable.
    pub fn total(&self) -> Result<Money, StoreError> {
        self.unit_price
            .try_mul(self.quantity)
            .ok_or(StoreError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_is_pending() {
        let order = Order::new(CustomerId::generate());
        assert_eq!(order.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_payment_status_wire_names() {
        assert_eq!(PaymentStatus::Pending.as_str(), "Pending");
        assert_eq!(PaymentStatus::Completed.as_str(), "Completed");
        assert_eq!(PaymentStatus::Failed.as_str(), "Failed");
    }

    #[test]
    fn test_order_item_total() {
        let item = OrderItem {
            order_id: OrderId::generate(),
            product_id: ProductId::generate(),
            quantity: 3,
            unit_price: Money::from_cents(1050),
        };
        assert_eq!(item.total().unwrap(), Money::from_cents(3150));
    }

    #[test]
    fn test_order_item_total_overflow() {
        let item = OrderItem {
            order_id: OrderId::generate(),
            product_id: ProductId::generate(),
            quantity: 2,
            unit_price: Money::from_cents(i64::MAX),
        };
        assert!(matches!(item.total().unwrap_err(), StoreError::Overflow));
    }
}
