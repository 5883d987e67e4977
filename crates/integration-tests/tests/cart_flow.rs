//! Integration tests for cart behavior.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p hemline-server)
//! - A seeded catalog (cargo run -p hemline-cli -- seed)
//!
//! Run with: cargo test -p hemline-integration-tests -- --ignored

use hemline_integration_tests::{add_cart_item, any_product_id, base_url, client, register_test_user};
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires a running Hemline server with seeded data"]
async fn adding_the_same_variant_twice_merges_into_one_line() {
    let client = client();
    register_test_user(&client).await;
    let product_id = any_product_id(&client).await;

    add_cart_item(&client, product_id, 2, Some("M"), Some("Black")).await;
    let cart = add_cart_item(&client, product_id, 3, Some("M"), Some("Black")).await;

    let items = cart["items"].as_array().expect("items should be an array");
    assert_eq!(items.len(), 1, "same variant must merge, not duplicate");
    assert_eq!(items[0]["quantity"], 5);
}

#[tokio::test]
#[ignore = "Requires a running Hemline server with seeded data"]
async fn missing_and_empty_variant_selections_are_the_same_line() {
    let client = client();
    register_test_user(&client).await;
    let product_id = any_product_id(&client).await;

    add_cart_item(&client, product_id, 1, None, None).await;
    let cart = add_cart_item(&client, product_id, 1, Some(""), Some("")).await;

    let items = cart["items"].as_array().expect("items should be an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 2);
}

#[tokio::test]
#[ignore = "Requires a running Hemline server with seeded data"]
async fn different_variants_stay_on_separate_lines() {
    let client = client();
    register_test_user(&client).await;
    let product_id = any_product_id(&client).await;

    add_cart_item(&client, product_id, 1, Some("M"), Some("Black")).await;
    let cart = add_cart_item(&client, product_id, 1, Some("L"), Some("Black")).await;

    let items = cart["items"].as_array().expect("items should be an array");
    assert_eq!(items.len(), 2);
}

#[tokio::test]
#[ignore = "Requires a running Hemline server with seeded data"]
async fn zero_quantity_update_removes_the_line() {
    let client = client();
    register_test_user(&client).await;
    let product_id = any_product_id(&client).await;

    let cart = add_cart_item(&client, product_id, 2, Some("M"), None).await;
    let item_id = cart["items"][0]["id"].as_i64().expect("item id");

    let resp = client
        .put(format!("{}/cart/{item_id}", base_url()))
        .json(&json!({ "quantity": 0 }))
        .send()
        .await
        .expect("Failed to update item");
    assert_eq!(resp.status(), 200);

    let cart: Value = resp.json().await.expect("cart should be JSON");
    assert!(cart["items"].as_array().expect("items").is_empty());
}

#[tokio::test]
#[ignore = "Requires a running Hemline server with seeded data"]
async fn invalid_quantities_are_rejected() {
    let client = client();
    register_test_user(&client).await;
    let product_id = any_product_id(&client).await;

    let resp = client
        .post(format!("{}/cart", base_url()))
        .json(&json!({ "productId": product_id, "quantity": 0 }))
        .send()
        .await
        .expect("Failed to post cart item");
    assert_eq!(resp.status(), 400, "zero quantity add must be rejected");

    let cart = add_cart_item(&client, product_id, 1, None, None).await;
    let item_id = cart["items"][0]["id"].as_i64().expect("item id");

    let resp = client
        .put(format!("{}/cart/{item_id}", base_url()))
        .json(&json!({ "quantity": -1 }))
        .send()
        .await
        .expect("Failed to update item");
    assert_eq!(resp.status(), 400, "negative quantity must be rejected");
}

#[tokio::test]
#[ignore = "Requires a running Hemline server with seeded data"]
async fn unknown_product_is_not_found() {
    let client = client();
    register_test_user(&client).await;

    let resp = client
        .post(format!("{}/cart", base_url()))
        .json(&json!({ "productId": 999_999_999, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to post cart item");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
#[ignore = "Requires a running Hemline server with seeded data"]
async fn removing_an_absent_item_is_not_found() {
    let client = client();
    register_test_user(&client).await;

    let resp = client
        .delete(format!("{}/cart/999999999", base_url()))
        .send()
        .await
        .expect("Failed to delete item");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
#[ignore = "Requires a running Hemline server with seeded data"]
async fn carts_are_isolated_between_users() {
    let alice = client();
    register_test_user(&alice).await;
    let product_id = any_product_id(&alice).await;
    let cart = add_cart_item(&alice, product_id, 1, Some("M"), None).await;
    let alice_item = cart["items"][0]["id"].as_i64().expect("item id");

    let bob = client();
    register_test_user(&bob).await;

    // Bob cannot see or touch Alice's cart line
    let resp = bob
        .get(format!("{}/cart", base_url()))
        .send()
        .await
        .expect("Failed to fetch cart");
    let bob_cart: Value = resp.json().await.expect("cart should be JSON");
    assert!(bob_cart["items"].as_array().expect("items").is_empty());

    let resp = bob
        .delete(format!("{}/cart/{alice_item}", base_url()))
        .send()
        .await
        .expect("Failed to delete item");
    assert_eq!(resp.status(), 404, "another user's item must look absent");
}
