//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! hemline-cli admin create -e admin@example.com -p <password> -n "Studio Admin"
//! ```
//!
//! Registration through the API never grants the admin flag; this command
//! is the only way to mint one. Running it against an existing account
//! promotes that account instead of failing.

use secrecy::ExposeSecret;
use sqlx::PgPool;

use hemline_core::Email;
use hemline_server::services::auth::hash_password;

use super::{CommandError, database_url};

/// Create a new admin account, or promote an existing account to admin.
///
/// # Errors
///
/// Returns an error if the email or password is invalid, or the database
/// operation fails.
pub async fn create(
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<(), CommandError> {
    dotenvy::dotenv().ok();

    let email =
        Email::parse(email).map_err(|e| CommandError::InvalidInput(format!("email: {e}")))?;
    if password.len() < 8 {
        return Err(CommandError::InvalidInput(
            "password must be at least 8 characters".to_owned(),
        ));
    }

    let password_hash = hash_password(password)
        .map_err(|e| CommandError::InvalidInput(format!("password hashing failed: {e}")))?;

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let id: i32 = sqlx::query_scalar(
        r"
        INSERT INTO users (email, password_hash, first_name, is_admin)
        VALUES ($1, $2, $3, TRUE)
        ON CONFLICT (email) DO UPDATE
        SET is_admin = TRUE, updated_at = NOW()
        RETURNING id
        ",
    )
    .bind(email.as_str())
    .bind(&password_hash)
    .bind(name)
    .fetch_one(&pool)
    .await?;

    tracing::info!("Admin account ready: {} (id {})", email, id);
    Ok(())
}
