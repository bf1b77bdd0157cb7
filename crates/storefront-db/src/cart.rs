//! Cart store: baskets and their line items.

use serde::{Deserialize, Serialize};
use storefront_commerce::cart::{validate_quantity, Cart, CartItem};
use storefront_commerce::{CartId, ProductId, StoreError};
use tracing::debug;

use crate::Db;

/// A cart together with its lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartContents {
    /// The cart record.
    pub cart: Cart,
    /// Its lines, one per (cart, product) pair.
    pub items: Vec<CartItem>,
}

impl CartContents {
    /// Total unit count across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Store for mutable pre-purchase basket state.
#[derive(Debug, Clone)]
pub struct CartStore {
    db: Db,
}

impl CartStore {
    /// Create a store over the given database handle.
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Allocate a new empty cart and return it.
    pub fn create_cart(&self) -> Result<Cart, StoreError> {
        self.db.transaction(|tx| {
            let cart = Cart::new();
            debug!(cart = %cart.id, "cart created");
            tx.tables_mut().carts.insert(cart.id.clone(), cart.clone());
            Ok(cart)
        })
    }

    /// Fetch a cart and its lines.
    pub fn get_cart(&self, id: &CartId) -> Result<CartContents, StoreError> {
        self.db.read(|t| {
            let cart = t
                .carts
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::CartNotFound(id.clone()))?;
            Ok(CartContents {
                items: t.cart_lines(id).to_vec(),
                cart,
            })
        })
    }

    /// Add units of a product to a cart.
    ///
    /// If a line for (cart, product) already exists the quantity accumulates
    /// into it; a duplicate line is never created. Fails `NotFound` if the
    /// cart or product is missing.
    pub fn add_item(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartItem, StoreError> {
        validate_quantity(quantity)?;
        self.db.transaction(|tx| {
            let t = tx.tables_mut();
            if !t.carts.contains_key(cart_id) {
                return Err(StoreError::CartNotFound(cart_id.clone()));
            }
            if !t.products.contains_key(product_id) {
                return Err(StoreError::ProductNotFound(product_id.clone()));
            }

            let lines = t.cart_items.entry(cart_id.clone()).or_default();
            let line = match lines.iter_mut().find(|l| &l.product_id == product_id) {
                Some(existing) => {
                    existing.accumulate(quantity)?;
                    existing.clone()
                }
                None => {
                    let line = CartItem::new(cart_id.clone(), product_id.clone(), quantity)?;
                    lines.push(line.clone());
                    line
                }
            };
            debug!(cart = %cart_id, product = %product_id, quantity = line.quantity, "cart line upserted");
            Ok(line)
        })
    }

    /// Replace the quantity on an existing line.
    ///
    /// Fails `InvalidArgument` if the quantity is below 1 and `NotFound` if
    /// the cart or line is missing.
    pub fn update_item_quantity(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartItem, StoreError> {
        validate_quantity(quantity)?;
        self.db.transaction(|tx| {
            let t = tx.tables_mut();
            if !t.carts.contains_key(cart_id) {
                return Err(StoreError::CartNotFound(cart_id.clone()));
            }
            let line = t
                .cart_items
                .get_mut(cart_id)
                .and_then(|lines| lines.iter_mut().find(|l| &l.product_id == product_id))
                .ok_or_else(|| StoreError::CartItemNotFound {
                    cart: cart_id.clone(),
                    product: product_id.clone(),
                })?;
            line.set_quantity(quantity)?;
            Ok(line.clone())
        })
    }

    /// Remove a line from a cart.
    pub fn remove_item(&self, cart_id: &CartId, product_id: &ProductId) -> Result<(), StoreError> {
        self.db.transaction(|tx| {
            let t = tx.tables_mut();
            if !t.carts.contains_key(cart_id) {
                return Err(StoreError::CartNotFound(cart_id.clone()));
            }
            let lines = t.cart_items.get_mut(cart_id);
            let removed = match lines {
                Some(lines) => {
                    let before = lines.len();
                    lines.retain(|l| &l.product_id != product_id);
                    lines.len() < before
                }
                None => false,
            };
            if !removed {
                return Err(StoreError::CartItemNotFound {
                    cart: cart_id.clone(),
                    product: product_id.clone(),
                });
            }
            t.cart_items.retain(|_, lines| !lines.is_empty());
            Ok(())
        })
    }

    /// Delete a cart, cascading deletion of its lines.
    pub fn delete_cart(&self, cart_id: &CartId) -> Result<(), StoreError> {
        self.db.transaction(|tx| {
            let t = tx.tables_mut();
            if t.carts.remove(cart_id).is_none() {
                return Err(StoreError::CartNotFound(cart_id.clone()));
            }
            t.cart_items.remove(cart_id);
            debug!(cart = %cart_id, "cart deleted");
            Ok(())
        })
    }
}
