//! Order route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hemline_core::{OrderId, OrderItemId, OrderStatus, Price, ProductId};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{Order, OrderItem, ShippingInfo};
use crate::services::checkout::CheckoutService;
use crate::state::AppState;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(checkout))
        .route("/orders/{id}", get(get_order))
}

/// Request body for placing an order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub shipping_name: String,
    pub shipping_email: String,
    pub shipping_address: String,
}

/// Public view of an order line item. All fields are snapshots taken at
/// checkout time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i32,
    pub price: Price,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            product_name: item.product_name,
            quantity: item.quantity,
            price: item.price,
            size: item.size,
            color: item.color,
        }
    }
}

/// Public view of an order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total: Price,
    pub shipping_name: String,
    pub shipping_email: String,
    pub shipping_address: String,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            status: order.status,
            total: order.total,
            shipping_name: order.shipping_name,
            shipping_email: order.shipping_email,
            shipping_address: order.shipping_address,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at,
        }
    }
}

/// List the current user's orders, newest first.
pub async fn list_orders(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>> {
    let orders = OrderRepository::new(state.pool()).list_for_user(user.id).await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// Get a single order belonging to the current user.
///
/// # Errors
///
/// Returns 404 when the order does not exist or belongs to someone else.
pub async fn get_order(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderResponse>> {
    let order = OrderRepository::new(state.pool())
        .get_for_user(user.id, OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))?;

    Ok(Json(order.into()))
}

/// Place an order from the current cart.
///
/// # Errors
///
/// Returns 400 when the cart is empty or shipping details are incomplete.
pub async fn checkout(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Json(body): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    let shipping = ShippingInfo {
        name: body.shipping_name,
        email: body.shipping_email,
        address: body.shipping_address,
    };

    let order = CheckoutService::new(state.pool())
        .checkout(user.id, &shipping)
        .await?;

    tracing::info!(
        order_id = order.id.as_i32(),
        user_id = user.id.as_i32(),
        "order placed"
    );
    Ok((StatusCode::CREATED, Json(order.into())))
}
