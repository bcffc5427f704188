//! Route definitions for the `/auth` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signin    -> sign_in
/// POST /refresh   -> refresh
/// POST /validate  -> validate
/// PUT  /password  -> change_password (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin", post(auth::sign_in))
        .route("/refresh", post(auth::refresh))
        .route("/validate", post(auth::validate))
        .route("/password", put(auth::change_password))
}
