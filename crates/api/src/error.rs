//! Application-level error type for HTTP handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use keygate_core::error::{AuthError, AuthErrorKind};
use serde_json::json;

/// Wraps [`AuthError`] for HTTP handlers. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `keygate_core`.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Auth(auth) = self;
        let (status, code, message) = classify_auth_error(&auth);

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error to an HTTP status, error code, and external message.
///
/// Authentication failures are deliberately uniform: user-not-found and
/// wrong-password produce the same status, code, and message, so responses
/// cannot be used to enumerate usernames. The internal distinction is kept
/// in the trace log only.
fn classify_auth_error(err: &AuthError) -> (StatusCode, &'static str, String) {
    match err.kind() {
        AuthErrorKind::MissingUsername
        | AuthErrorKind::MissingPassword
        | AuthErrorKind::UsernameTooShort
        | AuthErrorKind::PasswordTooShort => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }

        AuthErrorKind::UserNotFound | AuthErrorKind::InvalidCredentials => {
            tracing::debug!(error = %err, "authentication failure");
            (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password".to_string(),
            )
        }

        AuthErrorKind::TokenMalformed
        | AuthErrorKind::SignatureInvalid
        | AuthErrorKind::TokenExpired => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            "Invalid or expired token".to_string(),
        ),

        AuthErrorKind::InvalidRefreshToken => (
            StatusCode::UNAUTHORIZED,
            "INVALID_REFRESH_TOKEN",
            "Invalid or expired refresh token".to_string(),
        ),

        AuthErrorKind::Signing => {
            tracing::error!(error = %err, "token signing failure");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "Service temporarily unavailable".to_string(),
            )
        }

        AuthErrorKind::Persistence | AuthErrorKind::Timeout => {
            tracing::error!(error = %err, "storage failure");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "Service temporarily unavailable".to_string(),
            )
        }

        AuthErrorKind::Internal => {
            tracing::error!(error = %err, "internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(err: AuthError) -> (StatusCode, &'static str, String) {
        classify_auth_error(&err)
    }

    #[test]
    fn auth_failures_present_uniformly() {
        let (status_a, code_a, msg_a) = classify(AuthError::UserNotFound {
            username: "ghost".into(),
        });
        let (status_b, code_b, msg_b) = classify(AuthError::InvalidCredentials { user_id: 1 });

        assert_eq!(status_a, StatusCode::UNAUTHORIZED);
        assert_eq!((status_a, code_a, msg_a), (status_b, code_b, msg_b));
    }

    #[test]
    fn uniform_message_does_not_leak_the_username() {
        let (_, _, msg) = classify(AuthError::UserNotFound {
            username: "ghost".into(),
        });
        assert!(!msg.contains("ghost"));
    }

    #[test]
    fn validation_errors_are_client_errors() {
        let (status, code, _) = classify(AuthError::UsernameTooShort { min: 3 });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn storage_failures_are_unavailable_not_unauthorized() {
        let (status, _, _) = classify(AuthError::Timeout {
            operation: "refresh_token_upsert",
        });
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, _, _) = classify(AuthError::Signing {
            reason: "bad key".into(),
        });
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn domain_errors_convert_into_responses() {
        let response = AppError::from(AuthError::InvalidRefreshToken).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn token_failures_all_map_to_unauthenticated() {
        for err in [
            AuthError::TokenMalformed,
            AuthError::SignatureInvalid,
            AuthError::TokenExpired,
        ] {
            let (status, code, _) = classify(err);
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(code, "UNAUTHENTICATED");
        }
    }
}
