//! Site settings repository.
//!
//! The settings are a single row (id = 1). Reads without a persisted row
//! return the default without writing; the row is created lazily on the
//! first write.

use sqlx::PgPool;

use hemline_core::DropId;

use super::RepositoryError;
use crate::models::SiteSettings;

#[derive(sqlx::FromRow)]
struct SettingsRow {
    closed_mode: bool,
    closed_mode_drop_id: Option<i32>,
}

impl From<SettingsRow> for SiteSettings {
    fn from(row: SettingsRow) -> Self {
        Self {
            closed_mode: row.closed_mode,
            closed_mode_drop_id: row.closed_mode_drop_id.map(DropId::new),
        }
    }
}

/// The drop selection to persist for a closed-mode write. Only an enabled
/// gate keeps a selection; toggling off always stores NULL, so a stale
/// featured drop cannot survive the toggle.
const fn stored_drop_selection(enabled: bool, drop_id: Option<DropId>) -> Option<DropId> {
    if enabled { drop_id } else { None }
}

/// Repository for the site settings singleton.
pub struct SiteSettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SiteSettingsRepository<'a> {
    /// Create a new site settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the current settings, or the default when none are persisted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self) -> Result<SiteSettings, RepositoryError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            "SELECT closed_mode, closed_mode_drop_id FROM site_settings WHERE id = 1",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map_or_else(SiteSettings::default, SiteSettings::from))
    }

    /// Persist the closed-mode gate and return the post-write state.
    ///
    /// Disabling closed mode always stores a NULL drop selection, so a
    /// stale featured drop can never survive a toggle-off.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn set_closed_mode(
        &self,
        enabled: bool,
        drop_id: Option<DropId>,
    ) -> Result<SiteSettings, RepositoryError> {
        let stored_drop_id = stored_drop_selection(enabled, drop_id).map(|id| id.as_i32());

        let row = sqlx::query_as::<_, SettingsRow>(
            r"
            INSERT INTO site_settings (id, closed_mode, closed_mode_drop_id)
            VALUES (1, $1, $2)
            ON CONFLICT (id) DO UPDATE
            SET closed_mode = $1, closed_mode_drop_id = $2, updated_at = NOW()
            RETURNING closed_mode, closed_mode_drop_id
            ",
        )
        .bind(enabled)
        .bind(stored_drop_id)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_gate_keeps_the_selection() {
        let drop = Some(DropId::new(3));
        assert_eq!(stored_drop_selection(true, drop), drop);
        assert_eq!(stored_drop_selection(true, None), None);
    }

    #[test]
    fn disabling_clears_the_selection() {
        assert_eq!(stored_drop_selection(false, Some(DropId::new(3))), None);
        assert_eq!(stored_drop_selection(false, None), None);
    }
}
