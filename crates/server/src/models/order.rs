//! Order domain types.

use chrono::{DateTime, Utc};

use hemline_core::{OrderId, OrderItemId, OrderStatus, Price, ProductId, UserId};

/// A placed order (domain type).
///
/// Immutable once created except for status transitions. Totals and line
/// item prices are frozen at checkout time and never recomputed from the
/// live catalog.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// User who placed the order.
    pub user_id: UserId,
    /// Lifecycle status; orders are created `Pending`.
    pub status: OrderStatus,
    /// Computed total, frozen at checkout.
    pub total: Price,
    /// Shipping recipient name.
    pub shipping_name: String,
    /// Shipping contact email.
    pub shipping_email: String,
    /// Shipping address as free text.
    pub shipping_address: String,
    /// Snapshotted line items.
    pub items: Vec<OrderItem>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// A snapshotted order line item.
///
/// `product_id` is a historical reference, not a foreign key; the name and
/// price here survive catalog edits and deletions.
#[derive(Debug, Clone)]
pub struct OrderItem {
    /// Unique item ID.
    pub id: OrderItemId,
    /// Product ID at time of purchase. May no longer resolve.
    pub product_id: ProductId,
    /// Product name at time of purchase.
    pub product_name: String,
    /// Quantity purchased.
    pub quantity: i32,
    /// Unit price at time of purchase.
    pub price: Price,
    /// Selected size, `None` when unspecified.
    pub size: Option<String>,
    /// Selected color, `None` when unspecified.
    pub color: Option<String>,
}

/// Shipping details collected at checkout. All fields are required.
#[derive(Debug, Clone)]
pub struct ShippingInfo {
    pub name: String,
    pub email: String,
    pub address: String,
}
