//! Product catalog route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use hemline_core::{Price, ProductId};

use crate::db::drops::DropRepository;
use crate::db::products::{ProductInput, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::routes::drops::DropResponse;
use crate::state::AppState;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/{id}/drop", get(product_drop))
}

/// Query parameters for listing products.
#[derive(Debug, Deserialize)]
pub struct ListProductsParams {
    pub category: Option<String>,
}

/// Request body for creating or updating a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
}

impl ProductRequest {
    fn into_input(self) -> Result<ProductInput> {
        let price = Price::new(self.price)
            .map_err(|e| AppError::BadRequest(format!("invalid price: {e}")))?;

        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name is required".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(AppError::BadRequest("category is required".to_string()));
        }

        Ok(ProductInput {
            name: self.name,
            description: self.description,
            price,
            image_url: self.image_url,
            category: self.category,
            colors: self.colors,
            sizes: self.sizes,
        })
    }
}

/// Public view of a product.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: Option<String>,
    pub category: String,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            image_url: product.image_url,
            category: product.category,
            colors: product.colors,
            sizes: product.sizes,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// List products, newest first, optionally filtered by category.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsParams>,
) -> Result<Json<Vec<ProductResponse>>> {
    let products = ProductRepository::new(state.pool())
        .list(params.category.as_deref())
        .await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Get a single product.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))?;

    Ok(Json(product.into()))
}

/// Create a product (admin only).
pub async fn create_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let input = body.into_input()?;
    let product = ProductRepository::new(state.pool()).create(&input).await?;

    tracing::info!(product_id = product.id.as_i32(), "product created");
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// Update a product (admin only). All mutable fields are replaced.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
pub async fn update_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    let input = body.into_input()?;
    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &input)
        .await?;

    Ok(Json(product.into()))
}

/// Delete a product (admin only).
///
/// Existing order line items keep their snapshots; drop references to the
/// product become dangling and are skipped on read.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
pub async fn delete_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let deleted = ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("product {id} not found")));
    }

    tracing::info!(product_id = id, "product deleted");
    Ok(Json(json!({ "success": true })))
}

/// Get the drop a product belongs to, or null when it is not part of one.
///
/// # Errors
///
/// Returns 404 if the product itself does not exist.
pub async fn product_drop(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Option<DropResponse>>> {
    let product_id = ProductId::new(id);

    let exists = ProductRepository::new(state.pool())
        .get_by_id(product_id)
        .await?
        .is_some();
    if !exists {
        return Err(AppError::NotFound(format!("product {id} not found")));
    }

    let drop = DropRepository::new(state.pool())
        .drop_for_product(product_id)
        .await?;

    let now = Utc::now();
    Ok(Json(drop.map(|d| DropResponse::at(d, now))))
}
