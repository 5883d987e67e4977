//! Drop domain types.

use chrono::{DateTime, Utc};

use hemline_core::{DropId, DropStatus, ProductId};

/// A scheduled release event (domain type).
///
/// `product_ids` may contain references to deleted products; read paths
/// skip the missing ones instead of failing.
#[derive(Debug, Clone)]
pub struct Drop {
    /// Unique drop ID.
    pub id: DropId,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// When the drop goes live.
    pub drop_date: DateTime<Utc>,
    /// Products released by this drop.
    pub product_ids: Vec<ProductId>,
    /// When the drop was created.
    pub created_at: DateTime<Utc>,
    /// When the drop was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Drop {
    /// Derive the display status at `now`. Never stored.
    #[must_use]
    pub fn status(&self, now: DateTime<Utc>) -> DropStatus {
        if self.drop_date <= now {
            DropStatus::Live
        } else {
            DropStatus::Upcoming
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn drop_at(drop_date: DateTime<Utc>) -> Drop {
        Drop {
            id: DropId::new(1),
            title: "Test".to_owned(),
            description: String::new(),
            drop_date,
            product_ids: vec![],
            created_at: drop_date,
            updated_at: drop_date,
        }
    }

    #[test]
    fn past_drop_is_live() {
        let now = Utc::now();
        let drop = drop_at(now - TimeDelta::days(1));
        assert_eq!(drop.status(now), DropStatus::Live);
    }

    #[test]
    fn drop_at_exact_instant_is_live() {
        let now = Utc::now();
        let drop = drop_at(now);
        assert_eq!(drop.status(now), DropStatus::Live);
    }

    #[test]
    fn future_drop_is_upcoming() {
        let now = Utc::now();
        let drop = drop_at(now + TimeDelta::minutes(1));
        assert_eq!(drop.status(now), DropStatus::Upcoming);
    }
}
