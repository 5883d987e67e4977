//! User domain types.

use chrono::{DateTime, Utc};

use hemline_core::{Email, UserId};

/// A site account (domain type).
///
/// Admin-ness is a plain boolean; there is no separate admin account type.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
    /// Whether this account can use the admin endpoints.
    pub is_admin: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
