//! Cart domain types.

use hemline_core::{CartId, CartItemId, Price, ProductId, UserId};

/// A user's cart (domain type).
///
/// Created lazily on first access and never deleted; checkout empties it.
#[derive(Debug, Clone)]
pub struct Cart {
    /// Unique cart ID.
    pub id: CartId,
    /// Owning user. Exactly one cart per user.
    pub user_id: UserId,
    /// Current line items with product data joined for display.
    pub items: Vec<CartItem>,
}

/// A cart line item.
///
/// Identity is the (product, size, color) variant key; at most one row per
/// variant exists in a cart.
#[derive(Debug, Clone)]
pub struct CartItem {
    /// Unique item ID.
    pub id: CartItemId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Always positive; a zero-quantity update deletes the row instead.
    pub quantity: i32,
    /// Selected size, `None` when unspecified.
    pub size: Option<String>,
    /// Selected color, `None` when unspecified.
    pub color: Option<String>,
    /// Joined product data for display. Prices here are the live catalog
    /// prices, not a snapshot.
    pub product: CartItemProduct,
}

/// Product display data joined onto a cart item.
#[derive(Debug, Clone)]
pub struct CartItemProduct {
    /// Product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Current catalog price.
    pub price: Price,
    /// Optional image URL.
    pub image_url: Option<String>,
}
