//! Checkout orchestration.
//!
//! Converting a cart into an order is the one multi-step write in the
//! system, so it runs in a single transaction holding the cart row lock.
//! A concurrent add-to-cart takes the same lock, so an item either makes
//! it into the order or survives in the cart for the next one; it is
//! never silently dropped.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use hemline_core::{OrderId, OrderItemId, OrderStatus, Price, ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::carts::lock_or_create_cart;
use crate::models::{Order, OrderItem, ShippingInfo};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no items to convert into an order.
    #[error("cart is empty")]
    EmptyCart,

    /// A required shipping field is missing or blank.
    #[error("missing shipping field: {0}")]
    MissingShippingField(&'static str),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

#[derive(sqlx::FromRow)]
struct CheckoutLine {
    product_id: ProductId,
    quantity: i32,
    size: String,
    color: String,
    product_name: String,
    price: Price,
}

/// Service that turns carts into orders.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order from the user's current cart.
    ///
    /// Snapshots each line's product name and unit price as they are at
    /// this instant, computes the total from those snapshots, and clears
    /// the cart. All of it commits or none of it does.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingShippingField` if shipping details
    /// are incomplete, `CheckoutError::EmptyCart` if there is nothing to
    /// order, and `CheckoutError::Repository` for database failures.
    pub async fn checkout(
        &self,
        user_id: UserId,
        shipping: &ShippingInfo,
    ) -> Result<Order, CheckoutError> {
        validate_shipping(shipping)?;

        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        let cart_id = lock_or_create_cart(&mut tx, user_id).await?;

        let lines = sqlx::query_as::<_, CheckoutLine>(
            r"
            SELECT ci.product_id, ci.quantity, ci.size, ci.color,
                   p.name AS product_name, p.price
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.created_at, ci.id
            ",
        )
        .bind(cart_id)
        .fetch_all(&mut *tx)
        .await?;

        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let total = order_total(lines.iter().map(|l| (l.price, l.quantity)));
        let total = Price::new(total).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order total: {e}"))
        })?;

        #[derive(sqlx::FromRow)]
        struct InsertedOrder {
            id: OrderId,
            created_at: chrono::DateTime<chrono::Utc>,
        }

        let inserted = sqlx::query_as::<_, InsertedOrder>(
            r"
            INSERT INTO orders (user_id, total, shipping_name, shipping_email, shipping_address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at
            ",
        )
        .bind(user_id.as_i32())
        .bind(total)
        .bind(&shipping.name)
        .bind(&shipping.email)
        .bind(&shipping.address)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let item_id: OrderItemId = sqlx::query_scalar(
                r"
                INSERT INTO order_items
                    (order_id, product_id, product_name, quantity, price, size, color)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id
                ",
            )
            .bind(inserted.id.as_i32())
            .bind(line.product_id.as_i32())
            .bind(&line.product_name)
            .bind(line.quantity)
            .bind(line.price)
            .bind(&line.size)
            .bind(&line.color)
            .fetch_one(&mut *tx)
            .await?;

            items.push(OrderItem {
                id: item_id,
                product_id: line.product_id,
                product_name: line.product_name,
                quantity: line.quantity,
                price: line.price,
                size: if line.size.is_empty() { None } else { Some(line.size) },
                color: if line.color.is_empty() { None } else { Some(line.color) },
            });
        }

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await.map_err(RepositoryError::from)?;

        Ok(Order {
            id: inserted.id,
            user_id,
            status: OrderStatus::Pending,
            total,
            shipping_name: shipping.name.clone(),
            shipping_email: shipping.email.clone(),
            shipping_address: shipping.address.clone(),
            items,
            created_at: inserted.created_at,
        })
    }
}

/// Sum of unit price times quantity over the order lines.
fn order_total(lines: impl Iterator<Item = (Price, i32)>) -> Decimal {
    lines
        .map(|(price, quantity)| price.amount() * Decimal::from(quantity))
        .sum()
}

/// Require every shipping field to be present and non-blank.
fn validate_shipping(shipping: &ShippingInfo) -> Result<(), CheckoutError> {
    if shipping.name.trim().is_empty() {
        return Err(CheckoutError::MissingShippingField("name"));
    }
    if shipping.email.trim().is_empty() {
        return Err(CheckoutError::MissingShippingField("email"));
    }
    if shipping.address.trim().is_empty() {
        return Err(CheckoutError::MissingShippingField("address"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(cents: i64) -> Price {
        Price::new(Decimal::new(cents, 2)).expect("valid price")
    }

    #[test]
    fn total_is_sum_of_price_times_quantity() {
        let lines = [(price(8999), 2), (price(18999), 1)];
        let total = order_total(lines.into_iter());
        assert_eq!(total, Decimal::new(36997, 2));
    }

    #[test]
    fn total_of_no_lines_is_zero() {
        assert_eq!(order_total(std::iter::empty()), Decimal::ZERO);
    }

    #[test]
    fn blank_shipping_fields_are_rejected() {
        let shipping = ShippingInfo {
            name: "  ".to_owned(),
            email: "jo@example.com".to_owned(),
            address: "1 Main St".to_owned(),
        };
        assert!(matches!(
            validate_shipping(&shipping),
            Err(CheckoutError::MissingShippingField("name"))
        ));
    }

    #[test]
    fn complete_shipping_passes() {
        let shipping = ShippingInfo {
            name: "Jo Bloom".to_owned(),
            email: "jo@example.com".to_owned(),
            address: "1 Main St".to_owned(),
        };
        assert!(validate_shipping(&shipping).is_ok());
    }
}
