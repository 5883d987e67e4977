//! Authentication route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;

use hemline_core::UserId;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireUser, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

/// Request body for registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_admin: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_owned(),
            first_name: user.first_name,
            last_name: user.last_name,
            is_admin: user.is_admin,
        }
    }
}

async fn establish_session(session: &Session, user: &User) -> Result<()> {
    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
        is_admin: user.is_admin,
    };
    set_current_user(session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;

    set_sentry_user(&user.id.as_i32(), Some(user.email.as_str()));
    Ok(())
}

/// Register a new account and log it in.
///
/// # Errors
///
/// Returns 400 for an invalid email or weak password and 409 when the
/// email is already registered.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let auth = AuthService::new(state.pool());
    let user = auth
        .register(
            &body.email,
            &body.password,
            body.first_name.as_deref(),
            body.last_name.as_deref(),
        )
        .await?;

    establish_session(&session, &user).await?;

    tracing::info!(user_id = user.id.as_i32(), "account registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Log in with email and password.
///
/// # Errors
///
/// Returns 401 for a wrong email or password.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<UserResponse>> {
    let auth = AuthService::new(state.pool());
    let user = auth.login(&body.email, &body.password).await?;

    establish_session(&session, &user).await?;

    tracing::info!(user_id = user.id.as_i32(), "user logged in");
    Ok(Json(user.into()))
}

/// Log out the current user.
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    clear_sentry_user();

    Ok(Json(json!({ "success": true })))
}

/// Get the currently logged-in account.
///
/// # Errors
///
/// Returns 401 when nobody is logged in.
pub async fn me(
    RequireUser(current): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>> {
    let auth = AuthService::new(state.pool());
    let user = auth.get_user(current.id).await?;

    Ok(Json(user.into()))
}
