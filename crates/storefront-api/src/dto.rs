//! Request and response DTOs.
//!
//! Explicit wire shapes for the dispatch surface. Responses carry cents for
//! money (matching the domain serialization) and ISO-8601 timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::CartItem;
use storefront_commerce::catalog::{Collection, Product};
use storefront_commerce::customer::Customer;
use storefront_commerce::order::OrderItem;
use storefront_commerce::review::Review;
use storefront_commerce::{Money, StoreError};
use storefront_checkout::PlacedOrder;
use storefront_db::{CartContents, OrderContents};

/// A product, as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDto {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub unit_price: Money,
    pub inventory: i64,
    pub collection_id: String,
    pub last_update: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.into_inner(),
            title: p.title,
            slug: p.slug,
            description: p.description,
            unit_price: p.unit_price,
            inventory: p.inventory,
            collection_id: p.collection.into_inner(),
            last_update: p.last_update,
        }
    }
}

/// A collection, as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionDto {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_product: Option<String>,
}

impl From<Collection> for CollectionDto {
    fn from(c: Collection) -> Self {
        Self {
            id: c.id.into_inner(),
            title: c.title,
            featured_product: c.featured_product.map(|p| p.into_inner()),
        }
    }
}

/// One line of a cart response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItemDto {
    pub product_id: String,
    pub quantity: i64,
}

impl From<CartItem> for CartItemDto {
    fn from(i: CartItem) -> Self {
        Self {
            product_id: i.product_id.into_inner(),
            quantity: i.quantity,
        }
    }
}

/// A cart with its lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartDto {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<CartItemDto>,
}

impl From<CartContents> for CartDto {
    fn from(c: CartContents) -> Self {
        Self {
            id: c.cart.id.into_inner(),
            created_at: c.cart.created_at,
            items: c.items.into_iter().map(CartItemDto::from).collect(),
        }
    }
}

/// One line of an order response, priced at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemDto {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl From<OrderItem> for OrderItemDto {
    fn from(i: OrderItem) -> Self {
        Self {
            product_id: i.product_id.into_inner(),
            quantity: i.quantity,
            unit_price: i.unit_price,
        }
    }
}

/// An order with its snapshotted lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDto {
    pub id: String,
    pub customer_id: String,
    /// ISO-8601 placement timestamp.
    pub placed_at: DateTime<Utc>,
    /// `"Pending"`, `"Completed"` or `"Failed"`.
    pub payment_status: String,
    pub items: Vec<OrderItemDto>,
}

impl From<OrderContents> for OrderDto {
    fn from(c: OrderContents) -> Self {
        Self {
            id: c.order.id.into_inner(),
            customer_id: c.order.customer.into_inner(),
            placed_at: c.order.placed_at,
            payment_status: c.order.payment_status.as_str().to_string(),
            items: c.items.into_iter().map(OrderItemDto::from).collect(),
        }
    }
}

impl From<PlacedOrder> for OrderDto {
    fn from(p: PlacedOrder) -> Self {
        Self {
            id: p.order.id.into_inner(),
            customer_id: p.order.customer.into_inner(),
            placed_at: p.order.placed_at,
            payment_status: p.order.payment_status.as_str().to_string(),
            items: p.items.into_iter().map(OrderItemDto::from).collect(),
        }
    }
}

/// A review, as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewDto {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(r: Review) -> Self {
        Self {
            id: r.id.into_inner(),
            product_id: r.product_id.into_inner(),
            name: r.name,
            description: r.description,
            date: r.date,
        }
    }
}

/// A customer, as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerDto {
    pub id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub membership: String,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id.into_inner(),
            user_id: c.user_id.into_inner(),
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
            membership: c.membership.as_str().to_string(),
        }
    }
}

/// Create-product request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price in cents.
    pub unit_price: i64,
    pub inventory: i64,
    pub collection_id: String,
}

/// Update-product request body (administrative price change).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductRequest {
    /// New unit price in cents.
    pub unit_price: i64,
}

/// Create-collection request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCollectionRequest {
    pub title: String,
    #[serde(default)]
    pub featured_product: Option<String>,
}

/// Create-customer request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerRequest {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Add-cart-item request body.
#[derive(Debug, Clone, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// Update-cart-item request body.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i64,
}

/// Checkout request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub customer_id: String,
}

/// Create-review request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    pub name: String,
    pub description: String,
}

/// Update-payment-status request body.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    /// `"Pending"`, `"Completed"` or `"Failed"`.
    pub payment_status: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl From<&StoreError> for ErrorBody {
    fn from(e: &StoreError) -> Self {
        use storefront_commerce::ErrorKind;
        let code = match e.kind() {
            ErrorKind::NotFound => "not_found",
            ErrorKind::FailedPrecondition => "failed_precondition",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::TransactionAborted => "transaction_aborted",
        };
        Self {
            code: code.to_string(),
            message: e.to_string(),
        }
    }
}
