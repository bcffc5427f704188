//! Handlers for the `/auth` resource (sign-in, refresh, validate, password).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use keygate_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::engine::SessionTokens;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signin`.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
///
/// Identity is resolved from the refresh token alone; no access token is
/// required on this path.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /auth/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub access_token: String,
}

/// Request body for `PUT /auth/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
}

/// Successful authentication response returned by sign-in and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
}

/// Response body for `POST /auth/validate`.
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub user_id: DbId,
}

impl From<SessionTokens> for AuthResponse {
    fn from(tokens: SessionTokens) -> Self {
        AuthResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            user: UserInfo {
                id: tokens.user.id,
                username: tokens.user.username,
                email: tokens.user.email,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signin
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(input): Json<SignInRequest>,
) -> AppResult<Json<AuthResponse>> {
    let tokens = state.engine.sign_in(&input.username, &input.password).await?;
    Ok(Json(tokens.into()))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new access + refresh token pair.
/// The presented refresh token is invalidated by the rotation.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let tokens = state.engine.refresh_session(&input.refresh_token).await?;
    Ok(Json(tokens.into()))
}

/// POST /api/v1/auth/validate
///
/// Validate an access token and return its subject. Intended for services
/// that cannot verify signatures themselves.
pub async fn validate(
    State(state): State<AppState>,
    Json(input): Json<ValidateRequest>,
) -> AppResult<Json<ValidateResponse>> {
    let user_id = state.engine.validate_access_token(&input.access_token)?;
    Ok(Json(ValidateResponse { user_id }))
}

/// PUT /api/v1/auth/password
///
/// Change the authenticated user's password. Returns 204 No Content.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    state
        .engine
        .change_password(auth_user.user_id, &input.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
