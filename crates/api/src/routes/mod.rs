pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/signin     sign-in (public)
/// /auth/refresh    refresh (public)
/// /auth/validate   token validation (public)
/// /auth/password   password change (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/auth", auth::router())
}
