//! Database operations for the Hemline `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Site accounts (admin-ness is a boolean flag)
//! - `products` - Catalog
//! - `drops` / `drop_products` - Scheduled releases and their product join
//! - `site_settings` - Singleton storefront gate
//! - `carts` / `cart_items` - Per-user carts
//! - `orders` / `order_items` - Append-only order ledger
//!
//! Queries use the runtime sqlx API (`query`/`query_as`) so the workspace
//! builds without a live database or an offline query cache.
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p hemline-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod carts;
pub mod drops;
pub mod orders;
pub mod products;
pub mod site_settings;
pub mod users;

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
