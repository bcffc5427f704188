//! sqlx-backed implementations of the engine's store traits.
//!
//! Thin adapters over the `keygate-db` repositories: they translate sqlx
//! errors into [`AuthError::Persistence`] with the failing operation named,
//! and narrow full rows down to what the engine needs.

use async_trait::async_trait;
use keygate_core::error::AuthError;
use keygate_core::types::{DbId, Timestamp};
use keygate_db::models::user::User;
use keygate_db::repositories::{RefreshTokenRepo, UserRepo};
use keygate_db::DbPool;

use super::{CredentialStore, DirectoryUser, RefreshTokenStore, SessionEngine, UserDirectory};

/// The engine type as wired in production.
pub type PgSessionEngine = SessionEngine<PgUserDirectory, PgCredentialStore, PgRefreshTokenStore>;

fn persistence(operation: &'static str, err: sqlx::Error) -> AuthError {
    tracing::error!(operation, error = %err, "store operation failed");
    AuthError::Persistence {
        operation,
        reason: err.to_string(),
    }
}

impl From<User> for DirectoryUser {
    fn from(user: User) -> Self {
        DirectoryUser {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// User directory backed by the `users` table.
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: DbPool,
}

impl PgUserDirectory {
    pub fn new(pool: DbPool) -> Self {
        PgUserDirectory { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<DirectoryUser>, AuthError> {
        UserRepo::find_by_username(&self.pool, username)
            .await
            .map(|row| row.map(DirectoryUser::from))
            .map_err(|e| persistence("find_user_by_username", e))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<DirectoryUser>, AuthError> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map(|row| row.map(DirectoryUser::from))
            .map_err(|e| persistence("find_user_by_id", e))
    }
}

/// Credential store backed by the `users.password_hash` column.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: DbPool,
}

impl PgCredentialStore {
    pub fn new(pool: DbPool) -> Self {
        PgCredentialStore { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn password_hash(&self, user_id: DbId) -> Result<Option<String>, AuthError> {
        UserRepo::password_hash(&self.pool, user_id)
            .await
            .map_err(|e| persistence("load_password_hash", e))
    }

    async fn update_password_hash(&self, user_id: DbId, hash: &str) -> Result<bool, AuthError> {
        UserRepo::update_password(&self.pool, user_id, hash)
            .await
            .map_err(|e| persistence("update_password_hash", e))
    }
}

/// Refresh-token registry backed by the `refresh_tokens` table.
#[derive(Clone)]
pub struct PgRefreshTokenStore {
    pool: DbPool,
}

impl PgRefreshTokenStore {
    pub fn new(pool: DbPool) -> Self {
        PgRefreshTokenStore { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for PgRefreshTokenStore {
    async fn find_user_by_token(&self, token_hash: &str) -> Result<Option<DbId>, AuthError> {
        RefreshTokenRepo::find_user_by_token(&self.pool, token_hash)
            .await
            .map_err(|e| persistence("find_user_by_refresh_token", e))
    }

    async fn upsert(
        &self,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<(), AuthError> {
        RefreshTokenRepo::upsert(&self.pool, user_id, token_hash, expires_at)
            .await
            .map(|_| ())
            .map_err(|e| persistence("refresh_token_upsert", e))
    }
}
