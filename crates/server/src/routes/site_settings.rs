//! Site settings route handlers.

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use serde::{Deserialize, Serialize};

use hemline_core::DropId;

use crate::db::drops::DropRepository;
use crate::db::site_settings::SiteSettingsRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::SiteSettings;
use crate::state::AppState;

/// Build the site settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/site-settings", get(get_settings).put(put_settings))
}

/// Request body for updating the closed-mode gate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsRequest {
    pub closed_mode: bool,
    pub closed_mode_drop_id: Option<i32>,
}

/// Public view of the site settings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsResponse {
    pub closed_mode: bool,
    pub closed_mode_drop_id: Option<DropId>,
}

impl From<SiteSettings> for SiteSettingsResponse {
    fn from(settings: SiteSettings) -> Self {
        Self {
            closed_mode: settings.closed_mode,
            closed_mode_drop_id: settings.closed_mode_drop_id,
        }
    }
}

/// Get the current site settings.
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<SiteSettingsResponse>> {
    let settings = SiteSettingsRepository::new(state.pool()).get().await?;

    Ok(Json(settings.into()))
}

/// Update the closed-mode gate (admin only).
///
/// Enabling closed mode with a drop selection requires that drop to exist;
/// pointing the gate at a missing drop is rejected rather than stored.
/// Disabling closed mode always clears the selection.
///
/// # Errors
///
/// Returns 404 if the selected drop does not exist.
pub async fn put_settings(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<SiteSettingsRequest>,
) -> Result<Json<SiteSettingsResponse>> {
    let drop_id = body.closed_mode_drop_id.map(DropId::new);

    if body.closed_mode
        && let Some(id) = drop_id
    {
        let exists = DropRepository::new(state.pool()).get_by_id(id).await?.is_some();
        if !exists {
            return Err(AppError::NotFound(format!(
                "drop {} not found",
                id.as_i32()
            )));
        }
    }

    let settings = SiteSettingsRepository::new(state.pool())
        .set_closed_mode(body.closed_mode, drop_id)
        .await?;

    tracing::info!(closed_mode = settings.closed_mode, "site settings updated");
    Ok(Json(settings.into()))
}
