//! Session lifecycle orchestration: sign-in, refresh rotation, validation.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use keygate_core::error::AuthError;
use keygate_core::refresh_token::{generate_refresh_token, hash_refresh_token};
use keygate_core::types::DbId;
use keygate_core::validate::{validate_credentials, validate_new_password};

use crate::auth::jwt::TokenSigner;
use crate::auth::password::{hash_password, verify_password};

use super::{CredentialStore, DirectoryUser, RefreshTokenStore, UserDirectory};

/// Bound on every individual store operation. A stuck backend surfaces as a
/// distinguishable timeout error instead of a hung request.
const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// A freshly issued token pair plus the resolved user.
#[derive(Debug)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds.
    pub expires_in: i64,
    pub user: DirectoryUser,
}

/// Composes the user directory, credential store, refresh-token store, and
/// token signer into the three session operations.
///
/// Holds no mutable state of its own; the only shared mutable resource is
/// the refresh-token row per user, which the store rotates atomically.
pub struct SessionEngine<D, C, R> {
    directory: D,
    credentials: C,
    refresh_tokens: R,
    signer: TokenSigner,
    refresh_token_ttl: chrono::Duration,
}

impl<D, C, R> SessionEngine<D, C, R>
where
    D: UserDirectory,
    C: CredentialStore,
    R: RefreshTokenStore,
{
    pub fn new(
        directory: D,
        credentials: C,
        refresh_tokens: R,
        signer: TokenSigner,
        refresh_token_expiry_days: i64,
    ) -> Self {
        SessionEngine {
            directory,
            credentials,
            refresh_tokens,
            signer,
            refresh_token_ttl: chrono::Duration::days(refresh_token_expiry_days),
        }
    }

    /// Authenticate a username/password pair and establish a session.
    ///
    /// Input-shape violations fail before any store is consulted. A failure
    /// after token issuance (refresh persistence) aborts the whole call; no
    /// partial token pair is ever returned.
    pub async fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionTokens, AuthError> {
        validate_credentials(username, password)?;

        let user = self
            .bounded("find_user_by_username", self.directory.find_by_username(username))
            .await?
            .ok_or_else(|| AuthError::UserNotFound {
                username: username.to_string(),
            })?;

        let stored_hash = self
            .bounded("load_password_hash", self.credentials.password_hash(user.id))
            .await?
            .ok_or_else(|| AuthError::UserNotFound {
                username: username.to_string(),
            })?;

        let password_valid = verify_password(password, &stored_hash)
            .map_err(|e| AuthError::Internal(format!("password verification error: {e}")))?;
        if !password_valid {
            tracing::debug!(user_id = user.id, "password mismatch at sign-in");
            return Err(AuthError::InvalidCredentials { user_id: user.id });
        }

        self.establish_session(user).await
    }

    /// Exchange a refresh token for a new token pair, rotating it.
    ///
    /// Identity is resolved solely from the refresh-token store; claims of
    /// any previously issued access token are never consulted, so an expired
    /// access token cannot vouch for an identity. The presented token is
    /// only invalidated by the successful upsert of its replacement: if
    /// persistence fails, the old token remains valid.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<SessionTokens, AuthError> {
        let presented_hash = hash_refresh_token(refresh_token);

        let user_id = self
            .bounded(
                "find_user_by_refresh_token",
                self.refresh_tokens.find_user_by_token(&presented_hash),
            )
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        // The account may have been removed since the token was issued.
        // Presented uniformly as an invalid token to avoid leaking which.
        let user = self
            .bounded("find_user_by_id", self.directory.find_by_id(user_id))
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        self.establish_session(user).await
    }

    /// Validate an access token and return the subject user id.
    pub fn validate_access_token(&self, token: &str) -> Result<DbId, AuthError> {
        let claims = self.signer.verify(token)?;
        Ok(claims.sub)
    }

    /// Replace the caller's password hash with an Argon2id hash of the new
    /// password. Existing sessions stay valid; tokens are not revoked here.
    pub async fn change_password(
        &self,
        user_id: DbId,
        new_password: &str,
    ) -> Result<(), AuthError> {
        validate_new_password(new_password)?;

        let hash = hash_password(new_password)
            .map_err(|e| AuthError::Internal(format!("password hashing error: {e}")))?;

        let updated = self
            .bounded(
                "update_password_hash",
                self.credentials.update_password_hash(user_id, &hash),
            )
            .await?;
        if !updated {
            // Authenticated caller with no credential row: invariant breach.
            return Err(AuthError::Internal(format!(
                "no credential row for user {user_id} during password update"
            )));
        }
        Ok(())
    }

    /// Issue an access token, rotate the refresh token, and assemble the pair.
    ///
    /// Order matters: the refresh upsert is the commit point. If it fails,
    /// the freshly issued access token is discarded with the error and any
    /// previously stored refresh token is still in place.
    async fn establish_session(&self, user: DirectoryUser) -> Result<SessionTokens, AuthError> {
        let access_token = self.signer.issue(user.id)?;

        let refresh = generate_refresh_token();
        let expires_at = Utc::now() + self.refresh_token_ttl;
        self.bounded(
            "refresh_token_upsert",
            self.refresh_tokens.upsert(user.id, &refresh.hash, expires_at),
        )
        .await?;

        tracing::info!(user_id = user.id, "session established");

        Ok(SessionTokens {
            access_token,
            refresh_token: refresh.plaintext,
            expires_in: self.signer.ttl_secs(),
            user,
        })
    }

    /// Apply the per-operation store deadline.
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, AuthError>
    where
        F: Future<Output = Result<T, AuthError>>,
    {
        match tokio::time::timeout(STORE_TIMEOUT, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, "store operation timed out");
                Err(AuthError::Timeout { operation })
            }
        }
    }
}
