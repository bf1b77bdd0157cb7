//! The table set behind a [`crate::Db`].

use std::collections::HashMap;

use storefront_commerce::cart::{Cart, CartItem};
use storefront_commerce::catalog::{Collection, Product};
use storefront_commerce::customer::Customer;
use storefront_commerce::order::{Order, OrderItem};
use storefront_commerce::review::Review;
use storefront_commerce::{CartId, CollectionId, CustomerId, OrderId, ProductId, ReviewId};

/// One typed map per record kind.
///
/// `Clone` lets a transaction stage a working copy and commit it by swapping
/// it back in. Cart and order lines are grouped under their owner so that
/// cascade deletes are a single map removal.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    /// Catalog products.
    pub products: HashMap<ProductId, Product>,
    /// Catalog collections.
    pub collections: HashMap<CollectionId, Collection>,
    /// Customer directory.
    pub customers: HashMap<CustomerId, Customer>,
    /// Open carts.
    pub carts: HashMap<CartId, Cart>,
    /// Cart lines, keyed by owning cart.
    pub cart_items: HashMap<CartId, Vec<CartItem>>,
    /// Placed orders.
    pub orders: HashMap<OrderId, Order>,
    /// Order lines, keyed by owning order.
    pub order_items: HashMap<OrderId, Vec<OrderItem>>,
    /// Product reviews.
    pub reviews: HashMap<ReviewId, Review>,
}

impl Tables {
    /// Lines of the given cart, empty if the cart has none.
    pub fn cart_lines(&self, cart: &CartId) -> &[CartItem] {
        self.cart_items.get(cart).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lines of the given order, empty if unknown.
    pub fn order_lines(&self, order: &OrderId) -> &[OrderItem] {
        self.order_items
            .get(order)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any order line references the given product.
    pub fn product_has_order_lines(&self, product: &ProductId) -> bool {
        self.order_items
            .values()
            .flatten()
            .any(|line| &line.product_id == product)
    }
}
