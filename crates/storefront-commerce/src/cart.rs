//! Cart and cart line item types.
//!
//! A cart is mutable pre-purchase state addressed by an opaque token; it is
//! destroyed when converted to an order. Line items are unique per
//! (cart, product) pair and accumulate quantity on repeated adds.

use crate::error::StoreError;
use crate::ids::{CartId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart record. Line items are stored alongside it, keyed by cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Opaque cart token handed to the client.
    pub id: CartId,
    /// When the cart was created.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Create a new empty cart with a fresh token.
    pub fn new() -> Self {
        Self {
            id: CartId::generate(),
            created_at: Utc::now(),
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// A line in a cart: one product and a quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Owning cart.
    pub cart_id: CartId,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Units of the product, at least 1.
    pub quantity: i64,
}

impl CartItem {
    /// Create a new line, validating the quantity.
    pub fn new(cart_id: CartId, product_id: ProductId, quantity: i64) -> Result<Self, StoreError> {
        validate_quantity(quantity)?;
        Ok(Self {
            cart_id,
            product_id,
            quantity,
        })
    }

    /// Accumulate more units into this line.
    pub fn accumulate(&mut self, quantity: i64) -> Result<(), StoreError> {
        validate_quantity(quantity)?;
        let total = self
            .quantity
            .checked_add(quantity)
            .ok_or(StoreError::Overflow)?;
        if total > MAX_QUANTITY_PER_ITEM {
            return Err(StoreError::QuantityExceedsLimit(total, MAX_QUANTITY_PER_ITEM));
        }
        self.quantity = total;
        Ok(())
    }

    /// Replace the quantity on this line.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), StoreError> {
        validate_quantity(quantity)?;
        self.quantity = quantity;
        Ok(())
    }
}

/// Validate a caller-supplied quantity.
pub fn validate_quantity(quantity: i64) -> Result<(), StoreError> {
    if quantity < 1 {
        return Err(StoreError::InvalidQuantity(quantity));
    }
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(StoreError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_gets_fresh_token() {
        let a = Cart::new();
        let b = Cart::new();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_cart_item_rejects_zero_quantity() {
        let err = CartItem::new(CartId::generate(), ProductId::generate(), 0).unwrap_err();
        assert!(matches!(err, StoreError::InvalidQuantity(0)));
    }

    #[test]
    fn test_cart_item_accumulates() {
        let mut item = CartItem::new(CartId::generate(), ProductId::generate(), 2).unwrap();
        item.accumulate(2).unwrap();
        assert_eq!(item.quantity, 4);
    }

    #[test]
    fn test_accumulate_respects_ceiling() {
        let mut item =
            CartItem::new(CartId::generate(), ProductId::generate(), MAX_QUANTITY_PER_ITEM)
                .unwrap();
        let err = item.accumulate(1).unwrap_err();
        assert!(matches!(err, StoreError::QuantityExceedsLimit(_, _)));
        assert_eq!(item.quantity, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_set_quantity_replaces() {
        let mut item = CartItem::new(CartId::generate(), ProductId::generate(), 2).unwrap();
        item.set_quantity(7).unwrap();
        assert_eq!(item.quantity, 7);
        assert!(item.set_quantity(0).is_err());
    }
}
