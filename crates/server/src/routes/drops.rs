//! Drop route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use hemline_core::{DropId, DropStatus, ProductId};

use crate::db::drops::{DropInput, DropRepository};
use crate::db::site_settings::SiteSettingsRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Drop;
use crate::services::drops::select_next_drop;
use crate::state::AppState;

/// Build the drops router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/drops", get(list_drops).post(create_drop))
        .route("/drops/next", get(next_drop))
        .route("/drops/{id}", get(get_drop).put(update_drop).delete(delete_drop))
}

/// Request body for creating or updating a drop.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropRequest {
    pub title: String,
    pub description: String,
    pub drop_date: DateTime<Utc>,
    #[serde(default)]
    pub product_ids: Vec<i32>,
}

impl DropRequest {
    fn into_input(self) -> Result<DropInput> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title is required".to_string()));
        }

        Ok(DropInput {
            title: self.title,
            description: self.description,
            drop_date: self.drop_date,
            product_ids: self.product_ids.into_iter().map(ProductId::new).collect(),
        })
    }
}

/// Public view of a drop.
///
/// `status` is derived from the request's evaluation instant, never stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropResponse {
    pub id: DropId,
    pub title: String,
    pub description: String,
    pub drop_date: DateTime<Utc>,
    pub product_ids: Vec<ProductId>,
    pub status: DropStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DropResponse {
    /// Render a drop as it looks at `now`.
    #[must_use]
    pub fn at(drop: Drop, now: DateTime<Utc>) -> Self {
        let status = drop.status(now);
        Self {
            id: drop.id,
            title: drop.title,
            description: drop.description,
            drop_date: drop.drop_date,
            product_ids: drop.product_ids,
            status,
            created_at: drop.created_at,
            updated_at: drop.updated_at,
        }
    }
}

/// List all drops, newest first.
pub async fn list_drops(State(state): State<AppState>) -> Result<Json<Vec<DropResponse>>> {
    let drops = DropRepository::new(state.pool()).list().await?;

    let now = Utc::now();
    Ok(Json(drops.into_iter().map(|d| DropResponse::at(d, now)).collect()))
}

/// Get the drop the storefront should feature, or null.
///
/// Honors closed mode: when the gate is on and points at an existing drop,
/// that drop is returned regardless of chronology.
pub async fn next_drop(State(state): State<AppState>) -> Result<Json<Option<DropResponse>>> {
    let drops = DropRepository::new(state.pool()).list().await?;
    let settings = SiteSettingsRepository::new(state.pool()).get().await?;

    let now = Utc::now();
    let next = select_next_drop(&drops, &settings, now).cloned();

    Ok(Json(next.map(|d| DropResponse::at(d, now))))
}

/// Get a single drop.
///
/// # Errors
///
/// Returns 404 if the drop does not exist.
pub async fn get_drop(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DropResponse>> {
    let drop = DropRepository::new(state.pool())
        .get_by_id(DropId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("drop {id} not found")))?;

    Ok(Json(DropResponse::at(drop, Utc::now())))
}

/// Create a drop (admin only).
///
/// Product IDs are not validated against the catalog; a reference to a
/// later-deleted product is tolerated and skipped on read.
pub async fn create_drop(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<DropRequest>,
) -> Result<(StatusCode, Json<DropResponse>)> {
    let input = body.into_input()?;
    let drop = DropRepository::new(state.pool()).create(&input).await?;

    tracing::info!(drop_id = drop.id.as_i32(), "drop created");
    Ok((StatusCode::CREATED, Json(DropResponse::at(drop, Utc::now()))))
}

/// Update a drop (admin only), replacing its product associations.
///
/// # Errors
///
/// Returns 404 if the drop does not exist.
pub async fn update_drop(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<DropRequest>,
) -> Result<Json<DropResponse>> {
    let input = body.into_input()?;
    let drop = DropRepository::new(state.pool())
        .update(DropId::new(id), &input)
        .await?;

    Ok(Json(DropResponse::at(drop, Utc::now())))
}

/// Delete a drop (admin only).
///
/// If the site settings point at this drop, the reference is nulled by the
/// database and closed mode falls back to chronological selection.
///
/// # Errors
///
/// Returns 404 if the drop does not exist.
pub async fn delete_drop(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let deleted = DropRepository::new(state.pool()).delete(DropId::new(id)).await?;

    if !deleted {
        return Err(AppError::NotFound(format!("drop {id} not found")));
    }

    tracing::info!(drop_id = id, "drop deleted");
    Ok(Json(json!({ "success": true })))
}
