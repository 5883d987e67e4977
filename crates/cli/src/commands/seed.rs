//! Database seed command.
//!
//! Inserts a small demo catalog: a handful of products across categories
//! and one upcoming drop containing the newest pieces. Intended for local
//! development; running it twice inserts the catalog twice.

use chrono::{TimeDelta, Utc};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;

use hemline_server::services::auth::hash_password;

use super::{CommandError, database_url};

/// Email of the development admin account created by the seed.
const DEV_ADMIN_EMAIL: &str = "admin@hemline.test";

/// Password of the development admin account. Local use only.
const DEV_ADMIN_PASSWORD: &str = "hemline-dev-admin";

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    // Price in cents to keep the literals exact
    price_cents: i64,
    category: &'static str,
    colors: &'static [&'static str],
    sizes: &'static [&'static str],
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Signature Logo Tee - Black",
        description: "Heavyweight cotton tee with embroidered chest logo.",
        price_cents: 8999,
        category: "tshirts",
        colors: &["Black"],
        sizes: &["S", "M", "L", "XL"],
    },
    SeedProduct {
        name: "Signature Logo Tee - Navy",
        description: "Heavyweight cotton tee with embroidered chest logo.",
        price_cents: 8999,
        category: "tshirts",
        colors: &["Navy"],
        sizes: &["S", "M", "L", "XL"],
    },
    SeedProduct {
        name: "Signature Logo Tee - Cream",
        description: "Heavyweight cotton tee with embroidered chest logo.",
        price_cents: 8999,
        category: "tshirts",
        colors: &["Cream"],
        sizes: &["S", "M", "L", "XL"],
    },
    SeedProduct {
        name: "Essential Hoodie",
        description: "Brushed fleece hoodie with dropped shoulders.",
        price_cents: 18999,
        category: "hoodies",
        colors: &["Black", "Grey"],
        sizes: &["S", "M", "L", "XL"],
    },
    SeedProduct {
        name: "Relaxed Pants",
        description: "Wide-leg pants in washed twill.",
        price_cents: 15999,
        category: "pants",
        colors: &["Black", "Olive"],
        sizes: &["28", "30", "32", "34"],
    },
    SeedProduct {
        name: "Structured Jacket",
        description: "Boxy jacket with hidden placket and storm flap.",
        price_cents: 24999,
        category: "outerwear",
        colors: &["Black"],
        sizes: &["S", "M", "L"],
    },
];

/// Seed the database with the demo catalog.
///
/// # Errors
///
/// Returns an error if the database URL is missing or any insert fails.
pub async fn run() -> Result<(), CommandError> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let mut product_ids = Vec::with_capacity(PRODUCTS.len());
    for product in PRODUCTS {
        let colors: Vec<String> = product.colors.iter().map(ToString::to_string).collect();
        let sizes: Vec<String> = product.sizes.iter().map(ToString::to_string).collect();

        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO products (name, description, price, category, colors, sizes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            ",
        )
        .bind(product.name)
        .bind(product.description)
        .bind(Decimal::new(product.price_cents, 2))
        .bind(product.category)
        .bind(&colors)
        .bind(&sizes)
        .fetch_one(&pool)
        .await?;

        product_ids.push(id);
        tracing::info!("Seeded product {} ({})", product.name, id);
    }

    // One upcoming drop a week out, featuring the outerwear and hoodie
    let drop_date = Utc::now() + TimeDelta::days(7);
    let drop_id: i32 = sqlx::query_scalar(
        r"
        INSERT INTO drops (title, description, drop_date)
        VALUES ($1, $2, $3)
        RETURNING id
        ",
    )
    .bind("Autumn Capsule")
    .bind("Layering pieces for the colder months.")
    .bind(drop_date)
    .fetch_one(&pool)
    .await?;

    let featured: Vec<i32> = product_ids.iter().rev().take(2).copied().collect();
    sqlx::query(
        r"
        INSERT INTO drop_products (drop_id, product_id)
        SELECT $1, UNNEST($2::INT4[])
        ON CONFLICT DO NOTHING
        ",
    )
    .bind(drop_id)
    .bind(&featured)
    .execute(&pool)
    .await?;

    tracing::info!("Seeded drop Autumn Capsule ({drop_id})");

    // Development admin account
    let password_hash = hash_password(DEV_ADMIN_PASSWORD)
        .map_err(|e| CommandError::InvalidInput(format!("password hashing failed: {e}")))?;
    sqlx::query(
        r"
        INSERT INTO users (email, password_hash, first_name, is_admin)
        VALUES ($1, $2, 'Dev Admin', TRUE)
        ON CONFLICT (email) DO NOTHING
        ",
    )
    .bind(DEV_ADMIN_EMAIL)
    .bind(&password_hash)
    .execute(&pool)
    .await?;
    tracing::info!("Seeded admin account {DEV_ADMIN_EMAIL}");

    tracing::info!("Seed complete!");
    Ok(())
}
