//! Route handlers.
//!
//! Each module builds its own `Router<AppState>` with its request and
//! response payload types; this module merges them into the public API
//! surface. Auth is enforced per-handler with the `RequireUser` /
//! `RequireAdmin` extractors.

pub mod auth;
pub mod cart;
pub mod drops;
pub mod orders;
pub mod products;
pub mod site_settings;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(products::router())
        .merge(drops::router())
        .merge(site_settings::router())
        .merge(cart::router())
        .merge(orders::router())
}
