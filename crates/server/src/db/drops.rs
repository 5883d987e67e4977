//! Drop repository.
//!
//! Drops are loaded with their product associations aggregated from the
//! `drop_products` join table. Dangling product references (the product was
//! deleted after being added to a drop) are returned as-is; clients look the
//! IDs up against the catalog and tolerate misses.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use hemline_core::{DropId, ProductId};

use super::RepositoryError;
use crate::models::Drop;

/// Fields accepted when creating or updating a drop.
#[derive(Debug, Clone)]
pub struct DropInput {
    pub title: String,
    pub description: String,
    pub drop_date: DateTime<Utc>,
    pub product_ids: Vec<ProductId>,
}

#[derive(sqlx::FromRow)]
struct DropRow {
    id: DropId,
    title: String,
    description: String,
    drop_date: DateTime<Utc>,
    product_ids: Vec<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DropRow> for Drop {
    fn from(row: DropRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            drop_date: row.drop_date,
            product_ids: row.product_ids.into_iter().map(ProductId::new).collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const DROP_SELECT: &str = "SELECT d.id, d.title, d.description, d.drop_date, \
     d.created_at, d.updated_at, \
     COALESCE(ARRAY_AGG(dp.product_id ORDER BY dp.product_id) \
              FILTER (WHERE dp.product_id IS NOT NULL), '{}') AS product_ids \
     FROM drops d \
     LEFT JOIN drop_products dp ON dp.drop_id = d.id";

/// Repository for drop database operations.
pub struct DropRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DropRepository<'a> {
    /// Create a new drop repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all drops, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Drop>, RepositoryError> {
        let rows = sqlx::query_as::<_, DropRow>(&format!(
            "{DROP_SELECT} GROUP BY d.id ORDER BY d.created_at DESC, d.id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Drop::from).collect())
    }

    /// Get a drop by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: DropId) -> Result<Option<Drop>, RepositoryError> {
        let row = sqlx::query_as::<_, DropRow>(&format!(
            "{DROP_SELECT} WHERE d.id = $1 GROUP BY d.id"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Drop::from))
    }

    /// Get the drop a product belongs to, if any.
    ///
    /// A product may appear in several drops; the most recently created one
    /// wins, with ID as the tie-breaker, so repeated calls are deterministic.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn drop_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Option<Drop>, RepositoryError> {
        let row = sqlx::query_as::<_, DropRow>(&format!(
            "{DROP_SELECT} \
             WHERE d.id = (SELECT d2.id FROM drops d2 \
                           JOIN drop_products dp2 ON dp2.drop_id = d2.id \
                           WHERE dp2.product_id = $1 \
                           ORDER BY d2.created_at DESC, d2.id DESC LIMIT 1) \
             GROUP BY d.id"
        ))
        .bind(product_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Drop::from))
    }

    /// Create a new drop with its product associations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction fails.
    pub async fn create(&self, input: &DropInput) -> Result<Drop, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let drop_id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO drops (title, description, drop_date)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.drop_date)
        .fetch_one(&mut *tx)
        .await?;

        insert_product_links(&mut tx, drop_id, &input.product_ids).await?;

        tx.commit().await?;

        self.get_by_id(DropId::new(drop_id))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Update a drop, replacing its product associations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the drop does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: DropId, input: &DropInput) -> Result<Drop, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            UPDATE drops
            SET title = $2, description = $3, drop_date = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.drop_date)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query("DELETE FROM drop_products WHERE drop_id = $1")
            .bind(id.as_i32())
            .execute(&mut *tx)
            .await?;

        insert_product_links(&mut tx, id.as_i32(), &input.product_ids).await?;

        tx.commit().await?;

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a drop and its product associations.
    ///
    /// # Returns
    ///
    /// Returns `true` if the drop was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: DropId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM drops WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Insert join rows for a drop's products. Duplicate IDs in the input
/// collapse into one row (set semantics).
async fn insert_product_links(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    drop_id: i32,
    product_ids: &[ProductId],
) -> Result<(), RepositoryError> {
    if product_ids.is_empty() {
        return Ok(());
    }

    let raw_ids: Vec<i32> = product_ids.iter().map(|p| p.as_i32()).collect();
    sqlx::query(
        r"
        INSERT INTO drop_products (drop_id, product_id)
        SELECT $1, UNNEST($2::INT4[])
        ON CONFLICT DO NOTHING
        ",
    )
    .bind(drop_id)
    .bind(&raw_ids)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
