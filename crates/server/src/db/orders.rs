//! Order repository.
//!
//! Orders are append-only. Reads here never join the live catalog: line
//! items carry their own name and price snapshots.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use hemline_core::{OrderId, OrderItemId, OrderStatus, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: i32,
    status: String,
    total: Price,
    shipping_name: String,
    shipping_email: String,
    shipping_address: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: OrderItemId,
    order_id: i32,
    product_id: ProductId,
    product_name: String,
    quantity: i32,
    price: Price,
    size: String,
    color: String,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            quantity: row.quantity,
            price: row.price,
            size: if row.size.is_empty() { None } else { Some(row.size) },
            color: if row.color.is_empty() { None } else { Some(row.color) },
        }
    }
}

fn into_order(row: OrderRow, items: Vec<OrderItem>) -> Result<Order, RepositoryError> {
    let status = OrderStatus::from_str(&row.status)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid order status: {e}")))?;

    Ok(Order {
        id: row.id,
        user_id: UserId::new(row.user_id),
        status,
        total: row.total,
        shipping_name: row.shipping_name,
        shipping_email: row.shipping_email,
        shipping_address: row.shipping_address,
        items,
        created_at: row.created_at,
    })
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's orders with their line items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored status is invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let order_rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, status, total, shipping_name, shipping_email,
                   shipping_address, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        if order_rows.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = order_rows.iter().map(|o| o.id.as_i32()).collect();
        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_id, product_name, quantity, price, size, color
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
        for item in item_rows {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(item.into());
        }

        order_rows
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id.as_i32()).unwrap_or_default();
                into_order(row, items)
            })
            .collect()
    }

    /// Get a single order belonging to a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored status is invalid.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, status, total, shipping_name, shipping_email,
                   shipping_address, created_at
            FROM orders
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(order_id.as_i32())
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_id, product_name, quantity, price, size, color
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(order_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let items = item_rows.into_iter().map(OrderItem::from).collect();
        Ok(Some(into_order(row, items)?))
    }
}
