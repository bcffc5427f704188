//! The error taxonomy shared by every layer of the service.
//!
//! Each [`AuthError`] variant carries structured context (username, user id,
//! failing operation) and is tagged with an [`AuthErrorKind`]. Callers that
//! only care about the category match on the kind via [`AuthError::kind`] or
//! [`AuthError::is`]; the HTTP layer maps kinds to status codes.

use crate::types::DbId;

/// Category tag for an [`AuthError`].
///
/// Kinds are stable identifiers: the HTTP error mapping, log fields, and
/// tests all key off these rather than matching full variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Username missing from the request.
    MissingUsername,
    /// Password missing from the request.
    MissingPassword,
    /// Username shorter than the allowed minimum.
    UsernameTooShort,
    /// Password shorter than the allowed minimum.
    PasswordTooShort,
    /// No user exists for the presented identity.
    UserNotFound,
    /// Password did not match the stored credential.
    InvalidCredentials,
    /// Access token could not be decoded at all.
    TokenMalformed,
    /// Access token decoded but its signature did not verify.
    SignatureInvalid,
    /// Access token signature verified but `exp` has passed.
    TokenExpired,
    /// Refresh token unknown, expired, or already rotated away.
    InvalidRefreshToken,
    /// The signing subsystem failed to produce a token.
    Signing,
    /// A storage operation failed.
    Persistence,
    /// A storage operation exceeded its deadline.
    Timeout,
    /// Anything else.
    Internal,
}

/// Domain error for the authentication service.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("username is required")]
    MissingUsername,

    #[error("password is required")]
    MissingPassword,

    #[error("username must be at least {min} characters long")]
    UsernameTooShort { min: usize },

    #[error("password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("user {username:?} not found")]
    UserNotFound { username: String },

    #[error("invalid credentials for user {user_id}")]
    InvalidCredentials { user_id: DbId },

    #[error("malformed access token")]
    TokenMalformed,

    #[error("access token signature verification failed")]
    SignatureInvalid,

    #[error("access token expired")]
    TokenExpired,

    #[error("refresh token not recognized")]
    InvalidRefreshToken,

    #[error("token signing failed: {reason}")]
    Signing { reason: String },

    #[error("storage failure during {operation}: {reason}")]
    Persistence {
        operation: &'static str,
        reason: String,
    },

    #[error("storage operation {operation} timed out")]
    Timeout { operation: &'static str },

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// The category tag for this error.
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::MissingUsername => AuthErrorKind::MissingUsername,
            AuthError::MissingPassword => AuthErrorKind::MissingPassword,
            AuthError::UsernameTooShort { .. } => AuthErrorKind::UsernameTooShort,
            AuthError::PasswordTooShort { .. } => AuthErrorKind::PasswordTooShort,
            AuthError::UserNotFound { .. } => AuthErrorKind::UserNotFound,
            AuthError::InvalidCredentials { .. } => AuthErrorKind::InvalidCredentials,
            AuthError::TokenMalformed => AuthErrorKind::TokenMalformed,
            AuthError::SignatureInvalid => AuthErrorKind::SignatureInvalid,
            AuthError::TokenExpired => AuthErrorKind::TokenExpired,
            AuthError::InvalidRefreshToken => AuthErrorKind::InvalidRefreshToken,
            AuthError::Signing { .. } => AuthErrorKind::Signing,
            AuthError::Persistence { .. } => AuthErrorKind::Persistence,
            AuthError::Timeout { .. } => AuthErrorKind::Timeout,
            AuthError::Internal(_) => AuthErrorKind::Internal,
        }
    }

    /// True if this error belongs to the given category.
    pub fn is(&self, kind: AuthErrorKind) -> bool {
        self.kind() == kind
    }

    /// True for the request-shape validation kinds (no store was consulted).
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            AuthErrorKind::MissingUsername
                | AuthErrorKind::MissingPassword
                | AuthErrorKind::UsernameTooShort
                | AuthErrorKind::PasswordTooShort
        )
    }

    /// True for authentication failures that must be presented uniformly to
    /// external callers (username enumeration resistance).
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.kind(),
            AuthErrorKind::UserNotFound | AuthErrorKind::InvalidCredentials
        )
    }
}
