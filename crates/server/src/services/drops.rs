//! Drop selection logic.
//!
//! Pure functions over already-loaded drops and settings. `now` is always
//! passed in by the caller and re-evaluated per request, never cached.

use chrono::{DateTime, Utc};

use crate::models::{Drop, SiteSettings};

/// Select the drop the storefront should feature, or `None` when there is
/// nothing to count down to.
///
/// Closed mode with a configured drop is a fixed selection and overrides
/// chronology entirely, even if that drop is already live. When the
/// configured drop no longer resolves (deleted out from under the
/// settings), selection falls back to chronology instead of failing.
///
/// Chronological selection picks the soonest strictly-future drop;
/// simultaneous drop dates are broken by ID so repeated calls with the
/// same timestamp return the same drop.
#[must_use]
pub fn select_next_drop<'a>(
    drops: &'a [Drop],
    settings: &SiteSettings,
    now: DateTime<Utc>,
) -> Option<&'a Drop> {
    if settings.closed_mode
        && let Some(fixed_id) = settings.closed_mode_drop_id
        && let Some(fixed) = drops.iter().find(|d| d.id == fixed_id)
    {
        return Some(fixed);
    }

    drops
        .iter()
        .filter(|d| d.drop_date > now)
        .min_by_key(|d| (d.drop_date, d.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use hemline_core::DropId;

    fn drop_with(id: i32, drop_date: DateTime<Utc>) -> Drop {
        Drop {
            id: DropId::new(id),
            title: format!("Drop {id}"),
            description: String::new(),
            drop_date,
            product_ids: vec![],
            created_at: drop_date,
            updated_at: drop_date,
        }
    }

    fn open_settings() -> SiteSettings {
        SiteSettings::default()
    }

    #[test]
    fn picks_soonest_future_drop_when_open() {
        let now = Utc::now();
        let drops = vec![
            drop_with(1, now - TimeDelta::days(1)),
            drop_with(2, now + TimeDelta::days(5)),
            drop_with(3, now + TimeDelta::days(10)),
        ];

        let next = select_next_drop(&drops, &open_settings(), now);
        assert_eq!(next.map(|d| d.id), Some(DropId::new(2)));
    }

    #[test]
    fn closed_mode_fixed_selection_overrides_chronology() {
        let now = Utc::now();
        let drops = vec![
            drop_with(1, now - TimeDelta::days(1)),
            drop_with(2, now + TimeDelta::days(5)),
            drop_with(3, now + TimeDelta::days(10)),
        ];
        let settings = SiteSettings {
            closed_mode: true,
            closed_mode_drop_id: Some(DropId::new(3)),
        };

        let next = select_next_drop(&drops, &settings, now);
        assert_eq!(next.map(|d| d.id), Some(DropId::new(3)));
    }

    #[test]
    fn closed_mode_can_feature_a_live_drop() {
        let now = Utc::now();
        let drops = vec![
            drop_with(1, now - TimeDelta::days(1)),
            drop_with(2, now + TimeDelta::days(5)),
        ];
        let settings = SiteSettings {
            closed_mode: true,
            closed_mode_drop_id: Some(DropId::new(1)),
        };

        let next = select_next_drop(&drops, &settings, now);
        assert_eq!(next.map(|d| d.id), Some(DropId::new(1)));
    }

    #[test]
    fn dangling_closed_mode_selection_falls_back_to_chronology() {
        let now = Utc::now();
        let drops = vec![drop_with(2, now + TimeDelta::days(5))];
        let settings = SiteSettings {
            closed_mode: true,
            closed_mode_drop_id: Some(DropId::new(99)),
        };

        let next = select_next_drop(&drops, &settings, now);
        assert_eq!(next.map(|d| d.id), Some(DropId::new(2)));
    }

    #[test]
    fn simultaneous_drop_dates_break_ties_by_id() {
        let now = Utc::now();
        let at = now + TimeDelta::hours(2);
        let drops = vec![drop_with(7, at), drop_with(4, at), drop_with(9, at)];

        let next = select_next_drop(&drops, &open_settings(), now);
        assert_eq!(next.map(|d| d.id), Some(DropId::new(4)));

        // Stable under repeated evaluation with the same timestamp.
        let again = select_next_drop(&drops, &open_settings(), now);
        assert_eq!(again.map(|d| d.id), Some(DropId::new(4)));
    }

    #[test]
    fn no_future_drops_returns_none() {
        let now = Utc::now();
        let drops = vec![drop_with(1, now - TimeDelta::days(3))];

        assert!(select_next_drop(&drops, &open_settings(), now).is_none());
    }

    #[test]
    fn drop_exactly_at_now_is_not_upcoming() {
        let now = Utc::now();
        let drops = vec![drop_with(1, now)];

        assert!(select_next_drop(&drops, &open_settings(), now).is_none());
    }
}
