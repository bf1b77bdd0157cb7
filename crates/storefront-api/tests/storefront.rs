//! End-to-end tests over the dispatch surface.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::sync::Once;

use serde_json::json;
use storefront_api::{Api, ApiRequest, Resource, StoreConfig, Verb};
use storefront_checkout::{ListenerError, NotificationHub, OrderCreated, OrderListener};
use storefront_commerce::UserId;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

struct Seeded {
    api: Api,
    product_a: String,
    product_b: String,
    customer: String,
}

/// Seed a store with two products ($10.00 and $5.00) and one customer.
fn seeded_api(api: Api) -> Seeded {
    let response = api.dispatch(
        Resource::Collections,
        Verb::Create,
        ApiRequest::empty().body(json!({"title": "Books"})),
    );
    assert_eq!(response.status, 201);
    let collection = response.body["id"].as_str().unwrap().to_string();

    let create_product = |title: &str, slug: &str, cents: i64| -> String {
        let response = api.dispatch(
            Resource::Products,
            Verb::Create,
            ApiRequest::empty().body(json!({
                "title": title,
                "slug": slug,
                "unit_price": cents,
                "inventory": 25,
                "collection_id": collection,
            })),
        );
        assert_eq!(response.status, 201);
        response.body["id"].as_str().unwrap().to_string()
    };

    let product_a = create_product("Alpha", "alpha", 1000);
    let product_b = create_product("Beta", "beta", 500);

    let response = api.dispatch(
        Resource::Customers,
        Verb::Create,
        ApiRequest::empty().body(json!({
            "user_id": "user_7",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
        })),
    );
    assert_eq!(response.status, 201);
    let customer = response.body["id"].as_str().unwrap().to_string();

    Seeded {
        api,
        product_a,
        product_b,
        customer,
    }
}

fn create_cart(api: &Api) -> String {
    let response = api.dispatch(Resource::Carts, Verb::Create, ApiRequest::empty());
    assert_eq!(response.status, 201);
    response.body["id"].as_str().unwrap().to_string()
}

fn add_item(api: &Api, cart: &str, product: &str, quantity: i64) {
    let response = api.dispatch(
        Resource::CartItems,
        Verb::Create,
        ApiRequest::with_id(cart).body(json!({"product_id": product, "quantity": quantity})),
    );
    assert_eq!(response.status, 201);
}

#[test]
fn test_checkout_scenario_totals_25_dollars() {
    init_tracing();
    let s = seeded_api(Api::new(StoreConfig::default()));

    // Cart C: {(A, qty 2, $10.00), (B, qty 1, $5.00)}.
    let cart = create_cart(&s.api);
    add_item(&s.api, &cart, &s.product_a, 2);
    add_item(&s.api, &cart, &s.product_b, 1);

    let response = s.api.dispatch(
        Resource::Carts,
        Verb::Checkout,
        ApiRequest::with_id(&cart).body(json!({"customer_id": s.customer})),
    );
    assert_eq!(response.status, 201);
    assert_eq!(response.body["payment_status"], "Pending");
    assert_eq!(response.body["customer_id"], s.customer.as_str());

    let items = response.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    let total_cents: i64 = items
        .iter()
        .map(|i| i["unit_price"].as_i64().unwrap() * i["quantity"].as_i64().unwrap())
        .sum();
    assert_eq!(total_cents, 2500);

    // The cart is gone afterwards.
    let response = s
        .api
        .dispatch(Resource::Carts, Verb::Get, ApiRequest::with_id(&cart));
    assert_eq!(response.status, 404);
}

#[test]
fn test_checkout_empty_cart_is_400_and_creates_no_order() {
    init_tracing();
    let s = seeded_api(Api::new(StoreConfig::default()));
    let cart = create_cart(&s.api);

    let response = s.api.dispatch(
        Resource::Carts,
        Verb::Checkout,
        ApiRequest::with_id(&cart).body(json!({"customer_id": s.customer})),
    );
    assert_eq!(response.status, 400);
    assert_eq!(response.body["code"], "failed_precondition");

    // No order for the customer, and the cart survives.
    let response = s
        .api
        .dispatch(Resource::Orders, Verb::List, ApiRequest::with_id(&s.customer));
    assert_eq!(response.status, 200);
    assert!(response.body.as_array().unwrap().is_empty());

    let response = s
        .api
        .dispatch(Resource::Carts, Verb::Get, ApiRequest::with_id(&cart));
    assert_eq!(response.status, 200);
}

#[test]
fn test_checkout_missing_cart_and_customer_are_404() {
    init_tracing();
    let s = seeded_api(Api::new(StoreConfig::default()));

    let response = s.api.dispatch(
        Resource::Carts,
        Verb::Checkout,
        ApiRequest::with_id("cart_missing").body(json!({"customer_id": s.customer})),
    );
    assert_eq!(response.status, 404);

    let cart = create_cart(&s.api);
    add_item(&s.api, &cart, &s.product_a, 1);
    let response = s.api.dispatch(
        Resource::Carts,
        Verb::Checkout,
        ApiRequest::with_id(&cart).body(json!({"customer_id": "cust_missing"})),
    );
    assert_eq!(response.status, 404);

    // The failed attempt left the cart intact.
    let response = s
        .api
        .dispatch(Resource::Carts, Verb::Get, ApiRequest::with_id(&cart));
    assert_eq!(response.body["items"].as_array().unwrap().len(), 1);
}

#[test]
fn test_double_checkout_is_404() {
    init_tracing();
    let s = seeded_api(Api::new(StoreConfig::default()));
    let cart = create_cart(&s.api);
    add_item(&s.api, &cart, &s.product_a, 1);

    let body = json!({"customer_id": s.customer});
    let first = s.api.dispatch(
        Resource::Carts,
        Verb::Checkout,
        ApiRequest::with_id(&cart).body(body.clone()),
    );
    assert_eq!(first.status, 201);

    let second = s.api.dispatch(
        Resource::Carts,
        Verb::Checkout,
        ApiRequest::with_id(&cart).body(body),
    );
    assert_eq!(second.status, 404);
}

#[test]
fn test_add_item_twice_accumulates_one_line() {
    init_tracing();
    let s = seeded_api(Api::new(StoreConfig::default()));
    let cart = create_cart(&s.api);
    add_item(&s.api, &cart, &s.product_a, 2);
    add_item(&s.api, &cart, &s.product_a, 2);

    let response = s
        .api
        .dispatch(Resource::Carts, Verb::Get, ApiRequest::with_id(&cart));
    let items = response.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 4);
}

#[test]
fn test_update_and_remove_cart_item() {
    init_tracing();
    let s = seeded_api(Api::new(StoreConfig::default()));
    let cart = create_cart(&s.api);
    add_item(&s.api, &cart, &s.product_a, 2);

    let response = s.api.dispatch(
        Resource::CartItems,
        Verb::Update,
        ApiRequest::with_child(&cart, &s.product_a).body(json!({"quantity": 7})),
    );
    assert_eq!(response.status, 200);
    assert_eq!(response.body["quantity"], 7);

    // Quantity below 1 is rejected.
    let response = s.api.dispatch(
        Resource::CartItems,
        Verb::Update,
        ApiRequest::with_child(&cart, &s.product_a).body(json!({"quantity": 0})),
    );
    assert_eq!(response.status, 400);
    assert_eq!(response.body["code"], "invalid_argument");

    let response = s.api.dispatch(
        Resource::CartItems,
        Verb::Delete,
        ApiRequest::with_child(&cart, &s.product_a),
    );
    assert_eq!(response.status, 204);

    let response = s
        .api
        .dispatch(Resource::Carts, Verb::Get, ApiRequest::with_id(&cart));
    assert!(response.body["items"].as_array().unwrap().is_empty());
}

#[test]
fn test_price_change_does_not_rewrite_order_history() {
    init_tracing();
    let s = seeded_api(Api::new(StoreConfig::default()));
    let cart = create_cart(&s.api);
    add_item(&s.api, &cart, &s.product_a, 2);

    let placed = s.api.dispatch(
        Resource::Carts,
        Verb::Checkout,
        ApiRequest::with_id(&cart).body(json!({"customer_id": s.customer})),
    );
    assert_eq!(placed.status, 201);
    let order_id = placed.body["id"].as_str().unwrap().to_string();

    // Administrative price change after the fact.
    let response = s.api.dispatch(
        Resource::Products,
        Verb::Update,
        ApiRequest::with_id(&s.product_a).body(json!({"unit_price": 99_99})),
    );
    assert_eq!(response.status, 200);

    let response = s
        .api
        .dispatch(Resource::Orders, Verb::Get, ApiRequest::with_id(&order_id));
    assert_eq!(response.status, 200);
    assert_eq!(response.body["items"][0]["unit_price"], 1000);
}

#[test]
fn test_payment_status_update() {
    init_tracing();
    let s = seeded_api(Api::new(StoreConfig::default()));
    let cart = create_cart(&s.api);
    add_item(&s.api, &cart, &s.product_a, 1);

    let placed = s.api.dispatch(
        Resource::Carts,
        Verb::Checkout,
        ApiRequest::with_id(&cart).body(json!({"customer_id": s.customer})),
    );
    let order_id = placed.body["id"].as_str().unwrap().to_string();

    let response = s.api.dispatch(
        Resource::Orders,
        Verb::Update,
        ApiRequest::with_id(&order_id).body(json!({"payment_status": "Completed"})),
    );
    assert_eq!(response.status, 200);
    assert_eq!(response.body["payment_status"], "Completed");

    let response = s.api.dispatch(
        Resource::Orders,
        Verb::Update,
        ApiRequest::with_id(&order_id).body(json!({"payment_status": "Refunded"})),
    );
    assert_eq!(response.status, 400);
}

#[test]
fn test_reviews_nested_under_product() {
    init_tracing();
    let s = seeded_api(Api::new(StoreConfig::default()));

    let response = s.api.dispatch(
        Resource::Reviews,
        Verb::Create,
        ApiRequest::with_id(&s.product_a).body(json!({"name": "Ada", "description": "Great."})),
    );
    assert_eq!(response.status, 201);

    let response = s.api.dispatch(
        Resource::Reviews,
        Verb::List,
        ApiRequest::with_id(&s.product_a),
    );
    assert_eq!(response.status, 200);
    assert_eq!(response.body.as_array().unwrap().len(), 1);

    // Reviews under a missing product 404.
    let response = s.api.dispatch(
        Resource::Reviews,
        Verb::List,
        ApiRequest::with_id("prod_missing"),
    );
    assert_eq!(response.status, 404);
}

struct Counting {
    seen: AtomicUsize,
}

impl OrderListener for Counting {
    fn name(&self) -> &str {
        "counting"
    }

    fn on_order_created(&self, event: &OrderCreated) -> Result<(), ListenerError> {
        assert!(!event.items.is_empty());
        self.seen.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_checkout_notifies_registered_listeners() {
    init_tracing();
    let counting = Arc::new(Counting {
        seen: AtomicUsize::new(0),
    });
    let mut hub = NotificationHub::new();
    hub.register(counting.clone());

    let s = seeded_api(Api::with_hub(StoreConfig::default(), hub));
    let cart = create_cart(&s.api);
    add_item(&s.api, &cart, &s.product_a, 1);

    let response = s.api.dispatch(
        Resource::Carts,
        Verb::Checkout,
        ApiRequest::with_id(&cart).body(json!({"customer_id": s.customer})),
    );
    assert_eq!(response.status, 201);
    assert_eq!(counting.seen.load(Ordering::SeqCst), 1);
}

#[test]
fn test_config_can_disable_notifications() {
    init_tracing();
    let counting = Arc::new(Counting {
        seen: AtomicUsize::new(0),
    });
    let mut hub = NotificationHub::new();
    hub.register(counting.clone());

    let config = StoreConfig::from_toml(
        r#"
        name = "quiet-shop"
        notifications = false
        "#,
    )
    .unwrap();
    let s = seeded_api(Api::with_hub(config, hub));
    let cart = create_cart(&s.api);
    add_item(&s.api, &cart, &s.product_a, 1);

    let response = s.api.dispatch(
        Resource::Carts,
        Verb::Checkout,
        ApiRequest::with_id(&cart).body(json!({"customer_id": s.customer})),
    );
    assert_eq!(response.status, 201);
    assert_eq!(counting.seen.load(Ordering::SeqCst), 0);
}

#[test]
fn test_customer_lookup_by_user() {
    init_tracing();
    let s = seeded_api(Api::new(StoreConfig::default()));

    // The typed store surface resolves the customer behind a user.
    let customer = s
        .api
        .customers()
        .get_by_user_id(&UserId::new("user_7"))
        .unwrap();
    assert_eq!(customer.id.as_str(), s.customer);
    assert_eq!(customer.full_name(), "Ada Lovelace");
}

#[test]
fn test_configured_line_quantity_ceiling() {
    init_tracing();
    let config = StoreConfig::new("small-shop").with_max_line_quantity(10);
    let s = seeded_api(Api::new(config));
    let cart = create_cart(&s.api);

    let response = s.api.dispatch(
        Resource::CartItems,
        Verb::Create,
        ApiRequest::with_id(&cart).body(json!({"product_id": s.product_a, "quantity": 11})),
    );
    assert_eq!(response.status, 400);
    assert_eq!(response.body["code"], "invalid_argument");

    add_item(&s.api, &cart, &s.product_a, 10);
}

#[test]
fn test_listing_is_ordered_by_title() {
    init_tracing();
    let s = seeded_api(Api::new(StoreConfig::default()));
    let response = s
        .api
        .dispatch(Resource::Products, Verb::List, ApiRequest::empty());
    let titles: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alpha", "Beta"]);
}
