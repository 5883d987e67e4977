//! Integration tests for Hemline.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p hemline-cli -- migrate
//!
//! # Start the server
//! cargo run -p hemline-server
//!
//! # Run the ignored API tests against it
//! cargo test -p hemline-integration-tests -- --ignored
//! ```
//!
//! Tests that exercise the HTTP API are `#[ignore]`d because they need a
//! running server; logic-level tests run everywhere.

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("HEMLINE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store, so the session established
/// by register/login sticks for subsequent requests.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Register a fresh throwaway account and return its email. The client's
/// cookie store holds the session afterwards.
pub async fn register_test_user(client: &Client) -> String {
    let email = format!(
        "test-{}@example.com",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos()
    );

    let resp = client
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({
            "email": email,
            "password": "integration-test-pw",
        }))
        .send()
        .await
        .expect("Failed to register test user");
    assert_eq!(resp.status(), 201, "registration should succeed");

    email
}

/// Log in as the admin account created by `hemline-cli seed`. The client's
/// cookie store holds the admin session afterwards.
pub async fn login_seeded_admin(client: &Client) {
    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({
            "email": "admin@hemline.test",
            "password": "hemline-dev-admin",
        }))
        .send()
        .await
        .expect("Failed to log in as admin");
    assert_eq!(
        resp.status(),
        200,
        "admin login should succeed (run: hemline-cli seed)"
    );
}

/// Add an item to the logged-in user's cart and return the cart body.
pub async fn add_cart_item(
    client: &Client,
    product_id: i64,
    quantity: i32,
    size: Option<&str>,
    color: Option<&str>,
) -> Value {
    let resp = client
        .post(format!("{}/cart", base_url()))
        .json(&json!({
            "productId": product_id,
            "quantity": quantity,
            "size": size,
            "color": color,
        }))
        .send()
        .await
        .expect("Failed to add cart item");
    assert_eq!(resp.status(), 200, "add to cart should succeed");

    resp.json().await.expect("cart response should be JSON")
}

/// Fetch the first product ID from the catalog. Requires seeded data.
pub async fn any_product_id(client: &Client) -> i64 {
    let resp = client
        .get(format!("{}/products", base_url()))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), 200);

    let products: Value = resp.json().await.expect("products should be JSON");
    products
        .as_array()
        .and_then(|a| a.first())
        .and_then(|p| p["id"].as_i64())
        .expect("catalog should be seeded (run: hemline-cli seed)")
}
