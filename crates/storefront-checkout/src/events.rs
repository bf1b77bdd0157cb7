//! Post-commit checkout notifications.
//!
//! A one-way, fire-and-forget signal to zero or more independently-registered
//! listeners (email, inventory, analytics). A listener failure is logged and
//! swallowed; it never affects the committed order and is not retried.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storefront_commerce::{CustomerId, Money, OrderId, ProductId};
use thiserror::Error;
use tracing::warn;

/// One snapshotted line carried in the notification payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Product purchased.
    pub product_id: ProductId,
    /// Units purchased.
    pub quantity: i64,
    /// Unit price captured at checkout.
    pub unit_price: Money,
}

/// Notification emitted after a checkout commits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderCreated {
    /// The new order.
    pub order_id: OrderId,
    /// The customer who placed it.
    pub customer_id: CustomerId,
    /// The snapshotted lines.
    pub items: Vec<OrderLine>,
}

/// A listener failure. Recorded, never propagated.
#[derive(Error, Debug)]
#[error("listener failed: {0}")]
pub struct ListenerError(pub String);

impl ListenerError {
    /// Create a listener error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A consumer of checkout-completed notifications.
pub trait OrderListener: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Handle an order-created notification.
    fn on_order_created(&self, event: &OrderCreated) -> Result<(), ListenerError>;
}

/// Fan-out point for checkout notifications.
#[derive(Clone, Default)]
pub struct NotificationHub {
    listeners: Vec<Arc<dyn OrderListener>>,
}

impl NotificationHub {
    /// Create a hub with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn register(&mut self, listener: Arc<dyn OrderListener>) {
        self.listeners.push(listener);
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver an event to every listener.
    ///
    /// Each listener gets one attempt; failures are logged and do not stop
    /// delivery to the remaining listeners.
    pub fn emit(&self, event: &OrderCreated) {
        for listener in &self.listeners {
            if let Err(e) = listener.on_order_created(event) {
                warn!(
                    listener = listener.name(),
                    order = %event.order_id,
                    error = %e,
                    "order-created listener failed"
                );
            }
        }
    }
}

impl std::fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHub")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        seen: AtomicUsize,
    }

    impl OrderListener for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn on_order_created(&self, _event: &OrderCreated) -> Result<(), ListenerError> {
            self.seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Failing;

    impl OrderListener for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn on_order_created(&self, _event: &OrderCreated) -> Result<(), ListenerError> {
            Err(ListenerError::new("smtp timeout"))
        }
    }

    fn event() -> OrderCreated {
        OrderCreated {
            order_id: OrderId::generate(),
            customer_id: CustomerId::generate(),
            items: vec![OrderLine {
                product_id: ProductId::generate(),
                quantity: 1,
                unit_price: Money::from_cents(500),
            }],
        }
    }

    #[test]
    fn test_emit_reaches_all_listeners() {
        let counting = Arc::new(Counting {
            seen: AtomicUsize::new(0),
        });
        let mut hub = NotificationHub::new();
        hub.register(counting.clone());
        hub.register(counting.clone());

        hub.emit(&event());
        assert_eq!(counting.seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failing_listener_does_not_stop_delivery() {
        let counting = Arc::new(Counting {
            seen: AtomicUsize::new(0),
        });
        let mut hub = NotificationHub::new();
        hub.register(Arc::new(Failing));
        hub.register(counting.clone());

        hub.emit(&event());
        assert_eq!(counting.seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_event_payload_shape() {
        let event = event();
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("order_id").is_some());
        assert!(json.get("customer_id").is_some());
        assert_eq!(json["items"].as_array().unwrap().len(), 1);
        assert!(json["items"][0].get("unit_price").is_some());
    }
}
