//! Cart route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::{Deserialize, Serialize};

use hemline_core::{CartId, CartItemId, Price, ProductId};

use crate::db::carts::CartRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{Cart, CartItem};
use crate::services::cart::{is_valid_add_quantity, is_valid_update_quantity, normalize_variant};
use crate::state::AppState;

/// Build the cart router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart).post(add_item))
        .route("/cart/{item_id}", put(update_item).delete(remove_item))
}

/// Request body for adding a product variant to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: i32,
    pub quantity: i32,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Request body for setting a cart item's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i32,
}

/// Product display data joined onto a cart item.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemProductResponse {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_url: Option<String>,
}

/// Public view of a cart line item.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub size: Option<String>,
    pub color: Option<String>,
    pub product: CartItemProductResponse,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
            size: item.size,
            color: item.color,
            product: CartItemProductResponse {
                id: item.product.id,
                name: item.product.name,
                price: item.product.price,
                image_url: item.product.image_url,
            },
        }
    }
}

/// Public view of a cart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub id: CartId,
    pub items: Vec<CartItemResponse>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id,
            items: cart.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get the current user's cart, creating an empty one on first access.
pub async fn get_cart(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<CartResponse>> {
    let cart = CartRepository::new(state.pool()).get_or_create(user.id).await?;

    Ok(Json(cart.into()))
}

/// Add a product variant to the cart.
///
/// Adding a variant already in the cart increments its quantity; the
/// variant key treats a missing selection and an empty one as the same.
///
/// # Errors
///
/// Returns 400 for a non-positive quantity and 404 for an unknown product.
pub async fn add_item(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<CartResponse>> {
    if !is_valid_add_quantity(body.quantity) {
        return Err(AppError::BadRequest("quantity must be positive".to_string()));
    }

    let cart = CartRepository::new(state.pool())
        .add_item(
            user.id,
            ProductId::new(body.product_id),
            body.quantity,
            normalize_variant(body.size.as_deref()),
            normalize_variant(body.color.as_deref()),
        )
        .await?;

    Ok(Json(cart.into()))
}

/// Set a cart item's quantity. Zero removes the item.
///
/// # Errors
///
/// Returns 400 for a negative quantity and 404 when the item does not
/// exist in this user's cart.
pub async fn update_item(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Path(item_id): Path<i32>,
    Json(body): Json<UpdateItemRequest>,
) -> Result<Json<CartResponse>> {
    if !is_valid_update_quantity(body.quantity) {
        return Err(AppError::BadRequest("quantity cannot be negative".to_string()));
    }

    let cart = CartRepository::new(state.pool())
        .set_item_quantity(user.id, CartItemId::new(item_id), body.quantity)
        .await?;

    Ok(Json(cart.into()))
}

/// Remove a cart item.
///
/// # Errors
///
/// Returns 404 when the item does not exist in this user's cart.
pub async fn remove_item(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Path(item_id): Path<i32>,
) -> Result<Json<CartResponse>> {
    let cart = CartRepository::new(state.pool())
        .remove_item(user.id, CartItemId::new(item_id))
        .await?;

    Ok(Json(cart.into()))
}
