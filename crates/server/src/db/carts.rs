//! Cart repository.
//!
//! Cart identity rules live at the persistence boundary: the
//! `(cart_id, product_id, size, color)` unique constraint plus an
//! `ON CONFLICT .. DO UPDATE` upsert make the merge-increment atomic, so
//! two concurrent adds of the same variant both land. Size and color are
//! stored as empty strings when unspecified so the constraint lines up.

use sqlx::{PgPool, Postgres, Transaction};

use hemline_core::{CartId, CartItemId, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Cart, CartItem, CartItemProduct};

#[derive(sqlx::FromRow)]
struct CartItemRow {
    id: CartItemId,
    product_id: ProductId,
    quantity: i32,
    size: String,
    color: String,
    product_name: String,
    product_price: Price,
    product_image_url: Option<String>,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            size: stored_to_display(row.size),
            color: stored_to_display(row.color),
            product: CartItemProduct {
                id: row.product_id,
                name: row.product_name,
                price: row.product_price,
                image_url: row.product_image_url,
            },
        }
    }
}

/// Map a stored variant value back to the API shape: empty means
/// "no selection".
fn stored_to_display(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the user's cart, creating an empty one on first access.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        let cart_id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO carts (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET updated_at = NOW()
            RETURNING id
            ",
        )
        .bind(user_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        let items = self.load_items(CartId::new(cart_id)).await?;

        Ok(Cart {
            id: CartId::new(cart_id),
            user_id,
            items,
        })
    }

    /// Add a quantity of a product variant to the user's cart.
    ///
    /// `size` and `color` must already be normalized (empty string for
    /// "no selection"). If the variant is already present its quantity is
    /// incremented in a single atomic upsert; otherwise a new row is
    /// inserted. Runs in one transaction holding the cart row lock, so it
    /// serializes against a concurrent checkout.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
        size: &str,
        color: &str,
    ) -> Result<Cart, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let cart_id = lock_or_create_cart(&mut tx, user_id).await?;

        let product_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id.as_i32())
                .fetch_one(&mut *tx)
                .await?;
        if !product_exists {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query(
            r"
            INSERT INTO cart_items (cart_id, product_id, quantity, size, color)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (cart_id, product_id, size, color)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity,
                          updated_at = NOW()
            ",
        )
        .bind(cart_id)
        .bind(product_id.as_i32())
        .bind(quantity)
        .bind(size)
        .bind(color)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let items = self.load_items(CartId::new(cart_id)).await?;
        Ok(Cart {
            id: CartId::new(cart_id),
            user_id,
            items,
        })
    }

    /// Set the exact quantity of a cart item owned by the user.
    ///
    /// A quantity of zero deletes the item. The ownership check is part of
    /// the statement itself, so an item in another user's cart is
    /// indistinguishable from a missing one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist or
    /// belongs to another user's cart.
    pub async fn set_item_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<Cart, RepositoryError> {
        let result = if quantity == 0 {
            sqlx::query(
                r"
                DELETE FROM cart_items ci
                USING carts c
                WHERE ci.id = $1 AND ci.cart_id = c.id AND c.user_id = $2
                ",
            )
            .bind(item_id.as_i32())
            .bind(user_id.as_i32())
            .execute(self.pool)
            .await?
        } else {
            sqlx::query(
                r"
                UPDATE cart_items ci
                SET quantity = $3, updated_at = NOW()
                FROM carts c
                WHERE ci.id = $1 AND ci.cart_id = c.id AND c.user_id = $2
                ",
            )
            .bind(item_id.as_i32())
            .bind(user_id.as_i32())
            .bind(quantity)
            .execute(self.pool)
            .await?
        };

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_or_create(user_id).await
    }

    /// Remove a cart item owned by the user.
    ///
    /// Removing an item that is already absent is `NotFound`, matching the
    /// ownership check: callers cannot distinguish "gone" from "not yours".
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist or
    /// belongs to another user's cart.
    pub async fn remove_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<Cart, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_items ci
            USING carts c
            WHERE ci.id = $1 AND ci.cart_id = c.id AND c.user_id = $2
            ",
        )
        .bind(item_id.as_i32())
        .bind(user_id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_or_create(user_id).await
    }

    async fn load_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r"
            SELECT ci.id, ci.product_id, ci.quantity, ci.size, ci.color,
                   p.name AS product_name,
                   p.price AS product_price,
                   p.image_url AS product_image_url
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.created_at, ci.id
            ",
        )
        .bind(cart_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CartItem::from).collect())
    }
}

/// Upsert the cart row for a user inside a transaction, taking its row
/// lock. Checkout takes the same lock, which is what serializes the two.
pub(crate) async fn lock_or_create_cart(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
) -> Result<i32, RepositoryError> {
    let cart_id: i32 = sqlx::query_scalar(
        r"
        INSERT INTO carts (user_id)
        VALUES ($1)
        ON CONFLICT (user_id) DO UPDATE SET updated_at = NOW()
        RETURNING id
        ",
    )
    .bind(user_id.as_i32())
    .fetch_one(&mut **tx)
    .await?;

    Ok(cart_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stored_variant_displays_as_none() {
        assert_eq!(stored_to_display(String::new()), None);
        assert_eq!(stored_to_display("M".to_owned()), Some("M".to_owned()));
    }
}
