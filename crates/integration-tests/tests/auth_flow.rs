//! Integration tests for account registration and sessions.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p hemline-server)
//!
//! Run with: cargo test -p hemline-integration-tests -- --ignored

use hemline_integration_tests::{base_url, client, register_test_user};
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires a running Hemline server"]
async fn register_establishes_a_session() {
    let client = client();
    let email = register_test_user(&client).await;

    let resp = client
        .get(format!("{}/auth/me", base_url()))
        .send()
        .await
        .expect("Failed to fetch /auth/me");
    assert_eq!(resp.status(), 200);

    let me: Value = resp.json().await.expect("me should be JSON");
    assert_eq!(me["email"], email);
    assert_eq!(me["isAdmin"], false);
}

#[tokio::test]
#[ignore = "Requires a running Hemline server"]
async fn duplicate_registration_conflicts() {
    let client = client();
    let email = register_test_user(&client).await;

    let resp = client
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({ "email": email, "password": "another-password" }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
#[ignore = "Requires a running Hemline server"]
async fn wrong_password_is_unauthorized() {
    let client = client();
    let email = register_test_user(&client).await;

    let fresh = hemline_integration_tests::client();
    let resp = fresh
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({ "email": email, "password": "not-the-password" }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires a running Hemline server"]
async fn logout_clears_the_session() {
    let client = client();
    register_test_user(&client).await;

    let resp = client
        .post(format!("{}/auth/logout", base_url()))
        .send()
        .await
        .expect("Failed to logout");
    assert_eq!(resp.status(), 200);

    let resp = client
        .get(format!("{}/auth/me", base_url()))
        .send()
        .await
        .expect("Failed to fetch /auth/me");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires a running Hemline server"]
async fn cart_requires_authentication() {
    let anonymous = client();
    let resp = anonymous
        .get(format!("{}/cart", base_url()))
        .send()
        .await
        .expect("Failed to fetch cart");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires a running Hemline server"]
async fn admin_endpoints_reject_regular_users() {
    let client = client();
    register_test_user(&client).await;

    // Logged in but not an admin: 403
    let resp = client
        .post(format!("{}/products", base_url()))
        .json(&json!({
            "name": "Should Not Exist",
            "description": "",
            "price": "10.00",
            "category": "tshirts",
        }))
        .send()
        .await
        .expect("Failed to post product");
    assert_eq!(resp.status(), 403);

    // Not logged in at all: 401
    let anonymous = hemline_integration_tests::client();
    let resp = anonymous
        .put(format!("{}/site-settings", base_url()))
        .json(&json!({ "closedMode": true, "closedModeDropId": null }))
        .send()
        .await
        .expect("Failed to put settings");
    assert_eq!(resp.status(), 401);
}
