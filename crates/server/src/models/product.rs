//! Product domain types.

use chrono::{DateTime, Utc};

use hemline_core::{Price, ProductId};

/// A catalog product (domain type).
///
/// Colors are matched unordered but kept in the admin's input order for
/// display; sizes are an ordered sequence.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID. Identity is immutable once created.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Current catalog price. Orders snapshot this at checkout time.
    pub price: Price,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Category slug (e.g. "tshirts", "hoodies", "outerwear").
    pub category: String,
    /// Available colors, in display order.
    pub colors: Vec<String>,
    /// Available sizes, in display order.
    pub sizes: Vec<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}
