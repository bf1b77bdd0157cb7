//! The checkout workflow.

use serde::{Deserialize, Serialize};
use storefront_commerce::order::{Order, OrderItem};
use storefront_commerce::{CartId, CustomerId, Money, StoreError};
use storefront_db::Db;
use tracing::info;

use crate::events::{NotificationHub, OrderCreated, OrderLine};

/// The result of a successful checkout: the order plus its snapshotted lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacedOrder {
    /// The new order.
    pub order: Order,
    /// Its lines, priced at checkout time.
    pub items: Vec<OrderItem>,
}

impl PlacedOrder {
    /// Sum of all line totals, `Overflow` if not representable.
    pub fn total(&self) -> Result<Money, StoreError> {
        self.items.iter().try_fold(Money::zero(), |acc, item| {
            let line = item.total()?;
            acc.try_add(line).ok_or(StoreError::Overflow)
        })
    }
}

/// Converts carts into orders.
///
/// The whole conversion runs inside one storage transaction: on any failure
/// nothing is committed and the cart remains exactly as it was. Writers
/// serialize on the database, so two checkouts of the same cart cannot both
/// succeed; the loser observes the cart already deleted and gets `NotFound`.
#[derive(Debug, Clone)]
pub struct Checkout {
    db: Db,
    hub: NotificationHub,
}

impl Checkout {
    /// Create a checkout workflow with no listeners.
    pub fn new(db: Db) -> Self {
        Self {
            db,
            hub: NotificationHub::new(),
        }
    }

    /// Create a checkout workflow delivering to the given hub.
    pub fn with_hub(db: Db, hub: NotificationHub) -> Self {
        Self { db, hub }
    }

    /// Convert a cart into an order.
    ///
    /// Preconditions, checked in order, each a distinct failure:
    /// 1. the cart exists (`CartNotFound`),
    /// 2. the cart has at least one line (`EmptyCart`),
    /// 3. the customer exists (`CustomerNotFound`) — looked up, not created.
    ///
    /// On success the order and its lines are committed, the cart and its
    /// lines are gone, and an [`OrderCreated`] notification has been emitted
    /// (best-effort, outside the transaction). Product inventory is not
    /// decremented here.
    pub fn place_order(
        &self,
        cart_id: &CartId,
        customer_id: &CustomerId,
    ) -> Result<PlacedOrder, StoreError> {
        let (placed, total) = self.db.transaction(|tx| {
            let t = tx.tables_mut();

            if !t.carts.contains_key(cart_id) {
                return Err(StoreError::CartNotFound(cart_id.clone()));
            }
            let lines = t.cart_lines(cart_id).to_vec();
            if lines.is_empty() {
                return Err(StoreError::EmptyCart(cart_id.clone()));
            }
            if !t.customers.contains_key(customer_id) {
                return Err(StoreError::CustomerNotFound(customer_id.clone()));
            }

            let order = Order::new(customer_id.clone());

            // Join each cart line with its product to capture the current
            // unit price. The snapshot is a value copy; later price changes
            // never reach these lines.
            let mut items = Vec::with_capacity(lines.len());
            for line in &lines {
                let product = t
                    .products
                    .get(&line.product_id)
                    .ok_or_else(|| StoreError::ProductNotFound(line.product_id.clone()))?;
                items.push(OrderItem {
                    order_id: order.id.clone(),
                    product_id: line.product_id.clone(),
                    quantity: line.quantity,
                    unit_price: product.unit_price,
                });
            }

            // An order whose total cannot be represented is never committed.
            let placed = PlacedOrder { order, items };
            let total = placed.total()?;

            t.orders.insert(placed.order.id.clone(), placed.order.clone());
            t.order_items
                .insert(placed.order.id.clone(), placed.items.clone());
            t.carts.remove(cart_id);
            t.cart_items.remove(cart_id);

            Ok((placed, total))
        })?;

        info!(
            order = %placed.order.id,
            customer = %customer_id,
            lines = placed.items.len(),
            total = %total,
            "order placed"
        );

        // Post-commit notification; listener failures are the hub's problem.
        self.hub.emit(&OrderCreated {
            order_id: placed.order.id.clone(),
            customer_id: placed.order.customer.clone(),
            items: placed
                .items
                .iter()
                .map(|i| OrderLine {
                    product_id: i.product_id.clone(),
                    quantity: i.quantity,
                    unit_price: i.unit_price,
                })
                .collect(),
        });

        Ok(placed)
    }
}
