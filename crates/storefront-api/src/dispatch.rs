//! Resource+verb dispatch.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use storefront_checkout::{Checkout, NotificationHub};
use storefront_commerce::catalog::{Collection, Product};
use storefront_commerce::customer::Customer;
use storefront_commerce::order::PaymentStatus;
use storefront_commerce::{
    CartId, CollectionId, CustomerId, ErrorKind, Money, OrderId, ProductId, StoreError, UserId,
};
use storefront_db::{CartStore, CatalogStore, CustomerDirectory, Db, OrderStore, ReviewStore};
use tracing::info;

use crate::config::StoreConfig;
use crate::dto::{
    AddItemRequest, CartDto, CheckoutRequest, CollectionDto, CreateCollectionRequest,
    CreateCustomerRequest, CreateProductRequest, CreateReviewRequest, CustomerDto, ErrorBody,
    OrderDto, ProductDto, ReviewDto, UpdateItemRequest, UpdatePaymentStatusRequest,
    UpdateProductRequest,
};

/// Resources the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Catalog products.
    Products,
    /// Catalog collections.
    Collections,
    /// Customer records.
    Customers,
    /// Carts.
    Carts,
    /// Lines nested under a cart.
    CartItems,
    /// Placed orders.
    Orders,
    /// Reviews nested under a product.
    Reviews,
}

/// Verbs a resource can support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// List all (or all under a parent).
    List,
    /// Fetch one by id.
    Get,
    /// Create one.
    Create,
    /// Update one.
    Update,
    /// Delete one.
    Delete,
    /// Convert a cart into an order.
    Checkout,
}

/// A dispatched request: optional resource id, optional nested id, JSON body.
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    /// Primary resource id (e.g. the cart token).
    pub id: Option<String>,
    /// Nested id (e.g. the product on a cart line).
    pub child_id: Option<String>,
    /// Request body.
    pub body: Value,
}

impl ApiRequest {
    /// A request with no id and no body.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A request addressing one resource.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// A request addressing a nested resource.
    pub fn with_child(id: impl Into<String>, child_id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            child_id: Some(child_id.into()),
            body: Value::Null,
        }
    }

    /// Attach a body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    fn require_id(&self) -> Result<&str, StoreError> {
        self.id
            .as_deref()
            .ok_or_else(|| StoreError::InvalidBody("missing resource id".to_string()))
    }

    fn require_child_id(&self) -> Result<&str, StoreError> {
        self.child_id
            .as_deref()
            .ok_or_else(|| StoreError::InvalidBody("missing nested resource id".to_string()))
    }

    fn parse<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(self.body.clone())
            .map_err(|e| StoreError::InvalidBody(e.to_string()))
    }
}

/// A dispatched response: status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Status code using HTTP conventions.
    pub status: u16,
    /// Response body; `Null` for empty responses.
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn created(body: Value) -> Self {
        Self { status: 201, body }
    }

    fn no_content() -> Self {
        Self {
            status: 204,
            body: Value::Null,
        }
    }

    fn error(e: &StoreError) -> Self {
        let status = match e.kind() {
            ErrorKind::NotFound => 404,
            ErrorKind::FailedPrecondition | ErrorKind::InvalidArgument => 400,
            ErrorKind::TransactionAborted => 500,
        };
        Self {
            status,
            body: serde_json::to_value(ErrorBody::from(e)).unwrap_or(Value::Null),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

type Handler = fn(&Api, &ApiRequest) -> Result<ApiResponse, StoreError>;

/// The storefront API: stores, the checkout workflow, and the dispatch table.
pub struct Api {
    config: StoreConfig,
    catalog: CatalogStore,
    carts: CartStore,
    orders: OrderStore,
    customers: CustomerDirectory,
    reviews: ReviewStore,
    checkout: Checkout,
    table: HashMap<(Resource, Verb), Handler>,
}

impl Api {
    /// Create an API over a fresh database with no checkout listeners.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_hub(config, NotificationHub::new())
    }

    /// Create an API delivering checkout notifications to the given hub.
    ///
    /// The hub is ignored when the configuration disables notifications.
    pub fn with_hub(config: StoreConfig, hub: NotificationHub) -> Self {
        let db = Db::new();
        let hub = if config.notifications {
            hub
        } else {
            NotificationHub::new()
        };
        info!(store = %config.name, listeners = hub.listener_count(), "storefront api ready");
        Self {
            checkout: Checkout::with_hub(db.clone(), hub),
            catalog: CatalogStore::new(db.clone()),
            carts: CartStore::new(db.clone()),
            orders: OrderStore::new(db.clone()),
            customers: CustomerDirectory::new(db.clone()),
            reviews: ReviewStore::new(db),
            table: Self::build_table(),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The catalog store (administrative seeding and reads).
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// The cart store.
    pub fn carts(&self) -> &CartStore {
        &self.carts
    }

    /// The order store.
    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    /// The customer directory.
    pub fn customers(&self) -> &CustomerDirectory {
        &self.customers
    }

    /// The review store.
    pub fn reviews(&self) -> &ReviewStore {
        &self.reviews
    }

    /// Dispatch a request to the handler registered for (resource, verb).
    ///
    /// Unregistered pairs get a 405; handler failures map through the error
    /// taxonomy (`NotFound` 404, `FailedPrecondition`/`InvalidArgument` 400,
    /// `TransactionAborted` 500).
    pub fn dispatch(&self, resource: Resource, verb: Verb, request: ApiRequest) -> ApiResponse {
        match self.table.get(&(resource, verb)) {
            Some(handler) => match handler(self, &request) {
                Ok(response) => response,
                Err(e) => ApiResponse::error(&e),
            },
            None => ApiResponse {
                status: 405,
                body: json!({
                    "code": "method_not_allowed",
                    "message": format!("{:?} does not support {:?}", resource, verb),
                }),
            },
        }
    }

    fn build_table() -> HashMap<(Resource, Verb), Handler> {
        let mut table: HashMap<(Resource, Verb), Handler> = HashMap::new();

        table.insert((Resource::Products, Verb::List), Self::list_products);
        table.insert((Resource::Products, Verb::Get), Self::get_product);
        table.insert((Resource::Products, Verb::Create), Self::create_product);
        table.insert((Resource::Products, Verb::Update), Self::update_product);
        table.insert((Resource::Products, Verb::Delete), Self::delete_product);

        table.insert((Resource::Collections, Verb::List), Self::list_collections);
        table.insert((Resource::Collections, Verb::Get), Self::get_collection);
        table.insert((Resource::Collections, Verb::Create), Self::create_collection);
        table.insert((Resource::Collections, Verb::Delete), Self::delete_collection);

        table.insert((Resource::Customers, Verb::Get), Self::get_customer);
        table.insert((Resource::Customers, Verb::Create), Self::create_customer);

        table.insert((Resource::Carts, Verb::Get), Self::get_cart);
        table.insert((Resource::Carts, Verb::Create), Self::create_cart);
        table.insert((Resource::Carts, Verb::Delete), Self::delete_cart);
        table.insert((Resource::Carts, Verb::Checkout), Self::checkout_cart);

        table.insert((Resource::CartItems, Verb::Create), Self::add_cart_item);
        table.insert((Resource::CartItems, Verb::Update), Self::update_cart_item);
        table.insert((Resource::CartItems, Verb::Delete), Self::remove_cart_item);

        table.insert((Resource::Orders, Verb::Get), Self::get_order);
        table.insert((Resource::Orders, Verb::List), Self::list_orders);
        table.insert((Resource::Orders, Verb::Update), Self::update_order);

        table.insert((Resource::Reviews, Verb::List), Self::list_reviews);
        table.insert((Resource::Reviews, Verb::Create), Self::create_review);

        table
    }

    // Products

    fn list_products(&self, _req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let products: Vec<ProductDto> = self
            .catalog
            .list_products()?
            .into_iter()
            .map(ProductDto::from)
            .collect();
        Ok(ApiResponse::ok(serde_json::to_value(products).unwrap_or(Value::Null)))
    }

    fn get_product(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let id = ProductId::new(req.require_id()?);
        let product = self.catalog.get_product(&id)?;
        Ok(ApiResponse::ok(to_value(ProductDto::from(product))))
    }

    fn create_product(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let body: CreateProductRequest = req.parse()?;
        let mut product = Product::new(
            body.title,
            body.slug,
            Money::from_cents(body.unit_price),
            body.inventory,
            CollectionId::new(body.collection_id),
        )?;
        product.description = body.description;
        self.catalog.insert_product(product.clone())?;
        Ok(ApiResponse::created(to_value(ProductDto::from(product))))
    }

    fn update_product(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let id = ProductId::new(req.require_id()?);
        let body: UpdateProductRequest = req.parse()?;
        self.catalog
            .set_unit_price(&id, Money::from_cents(body.unit_price))?;
        let product = self.catalog.get_product(&id)?;
        Ok(ApiResponse::ok(to_value(ProductDto::from(product))))
    }

    fn delete_product(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let id = ProductId::new(req.require_id()?);
        self.catalog.delete_product(&id)?;
        Ok(ApiResponse::no_content())
    }

    // Collections

    fn list_collections(&self, _req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let collections: Vec<CollectionDto> = self
            .catalog
            .list_collections()?
            .into_iter()
            .map(CollectionDto::from)
            .collect();
        Ok(ApiResponse::ok(serde_json::to_value(collections).unwrap_or(Value::Null)))
    }

    fn get_collection(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let id = CollectionId::new(req.require_id()?);
        let collection = self.catalog.get_collection(&id)?;
        Ok(ApiResponse::ok(to_value(CollectionDto::from(collection))))
    }

    fn create_collection(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let body: CreateCollectionRequest = req.parse()?;
        let mut collection = Collection::new(body.title);
        collection.featured_product = body.featured_product.map(ProductId::new);
        self.catalog.insert_collection(collection.clone())?;
        Ok(ApiResponse::created(to_value(CollectionDto::from(collection))))
    }

    fn delete_collection(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let id = CollectionId::new(req.require_id()?);
        self.catalog.delete_collection(&id)?;
        Ok(ApiResponse::no_content())
    }

    // Customers

    fn get_customer(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let id = CustomerId::new(req.require_id()?);
        let customer = self.customers.get(&id)?;
        Ok(ApiResponse::ok(to_value(CustomerDto::from(customer))))
    }

    fn create_customer(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let body: CreateCustomerRequest = req.parse()?;
        let customer = Customer::new(
            UserId::new(body.user_id),
            body.first_name,
            body.last_name,
            body.email,
        );
        self.customers.insert(customer.clone())?;
        Ok(ApiResponse::created(to_value(CustomerDto::from(customer))))
    }

    // Carts

    fn create_cart(&self, _req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let cart = self.carts.create_cart()?;
        let contents = self.carts.get_cart(&cart.id)?;
        Ok(ApiResponse::created(to_value(CartDto::from(contents))))
    }

    fn get_cart(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let id = CartId::new(req.require_id()?);
        let contents = self.carts.get_cart(&id)?;
        Ok(ApiResponse::ok(to_value(CartDto::from(contents))))
    }

    fn delete_cart(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let id = CartId::new(req.require_id()?);
        self.carts.delete_cart(&id)?;
        Ok(ApiResponse::no_content())
    }

    fn checkout_cart(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let cart_id = CartId::new(req.require_id()?);
        let body: CheckoutRequest = req.parse()?;
        let placed = self
            .checkout
            .place_order(&cart_id, &CustomerId::new(body.customer_id))?;
        Ok(ApiResponse::created(to_value(OrderDto::from(placed))))
    }

    // Cart items

    /// Enforce the configured per-line ceiling on a caller-supplied quantity.
    fn check_line_quantity(&self, quantity: i64) -> Result<(), StoreError> {
        if quantity > self.config.max_line_quantity {
            return Err(StoreError::QuantityExceedsLimit(
                quantity,
                self.config.max_line_quantity,
            ));
        }
        Ok(())
    }

    fn add_cart_item(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let cart_id = CartId::new(req.require_id()?);
        let body: AddItemRequest = req.parse()?;
        self.check_line_quantity(body.quantity)?;
        let line = self
            .carts
            .add_item(&cart_id, &ProductId::new(body.product_id), body.quantity)?;
        Ok(ApiResponse::created(to_value(crate::dto::CartItemDto::from(line))))
    }

    fn update_cart_item(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let cart_id = CartId::new(req.require_id()?);
        let product_id = ProductId::new(req.require_child_id()?);
        let body: UpdateItemRequest = req.parse()?;
        self.check_line_quantity(body.quantity)?;
        let line = self
            .carts
            .update_item_quantity(&cart_id, &product_id, body.quantity)?;
        Ok(ApiResponse::ok(to_value(crate::dto::CartItemDto::from(line))))
    }

    fn remove_cart_item(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let cart_id = CartId::new(req.require_id()?);
        let product_id = ProductId::new(req.require_child_id()?);
        self.carts.remove_item(&cart_id, &product_id)?;
        Ok(ApiResponse::no_content())
    }

    // Orders

    fn get_order(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let id = OrderId::new(req.require_id()?);
        let contents = self.orders.get_order(&id)?;
        Ok(ApiResponse::ok(to_value(OrderDto::from(contents))))
    }

    /// List orders for a customer; the request id is the customer id.
    fn list_orders(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let customer = CustomerId::new(req.require_id()?);
        // Listing for an unknown customer is a 404, matching the nested route.
        self.customers.get(&customer)?;
        let orders: Vec<OrderDto> = self
            .orders
            .list_for_customer(&customer)?
            .into_iter()
            .map(OrderDto::from)
            .collect();
        Ok(ApiResponse::ok(serde_json::to_value(orders).unwrap_or(Value::Null)))
    }

    fn update_order(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let id = OrderId::new(req.require_id()?);
        let body: UpdatePaymentStatusRequest = req.parse()?;
        let status = match body.payment_status.as_str() {
            "Pending" => PaymentStatus::Pending,
            "Completed" => PaymentStatus::Completed,
            "Failed" => PaymentStatus::Failed,
            other => {
                return Err(StoreError::InvalidBody(format!(
                    "unknown payment status: {other}"
                )))
            }
        };
        self.orders.set_payment_status(&id, status)?;
        let contents = self.orders.get_order(&id)?;
        Ok(ApiResponse::ok(to_value(OrderDto::from(contents))))
    }

    // Reviews

    /// List reviews for a product; the request id is the product id.
    fn list_reviews(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let product = ProductId::new(req.require_id()?);
        let reviews: Vec<ReviewDto> = self
            .reviews
            .list_for_product(&product)?
            .into_iter()
            .map(ReviewDto::from)
            .collect();
        Ok(ApiResponse::ok(serde_json::to_value(reviews).unwrap_or(Value::Null)))
    }

    fn create_review(&self, req: &ApiRequest) -> Result<ApiResponse, StoreError> {
        let product = ProductId::new(req.require_id()?);
        let body: CreateReviewRequest = req.parse()?;
        let review = self.reviews.add_review(&product, body.name, body.description)?;
        Ok(ApiResponse::created(to_value(ReviewDto::from(review))))
    }
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("store", &self.config.name)
            .field("routes", &self.table.len())
            .finish()
    }
}

fn to_value<T: serde::Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
