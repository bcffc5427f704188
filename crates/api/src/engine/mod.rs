//! The session engine and its store seams.
//!
//! The engine orchestrates credential verification, token issuance, and
//! refresh rotation against three narrow store traits. Production wires the
//! sqlx-backed implementations from [`stores`]; unit tests substitute
//! in-memory mocks.

pub mod session;
pub mod stores;

use async_trait::async_trait;
use keygate_core::error::AuthError;
use keygate_core::types::{DbId, Timestamp};

pub use session::{SessionEngine, SessionTokens};
pub use stores::{PgCredentialStore, PgRefreshTokenStore, PgSessionEngine, PgUserDirectory};

/// The user view the engine needs: stable id plus display identity.
#[derive(Debug, Clone)]
pub struct DirectoryUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
}

/// Resolves usernames and ids to users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<DirectoryUser>, AuthError>;
    async fn find_by_id(&self, id: DbId) -> Result<Option<DirectoryUser>, AuthError>;
}

/// Holds password hashes keyed by user id. Hashes never leave the engine.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn password_hash(&self, user_id: DbId) -> Result<Option<String>, AuthError>;
    /// Replace the stored hash. Returns `false` if the user row is gone.
    async fn update_password_hash(&self, user_id: DbId, hash: &str) -> Result<bool, AuthError>;
}

/// Durable single-active-token-per-user refresh-token registry.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Resolve the owner of a presented token hash (non-expired rows only).
    async fn find_user_by_token(&self, token_hash: &str) -> Result<Option<DbId>, AuthError>;
    /// Atomically insert-or-overwrite the active token for a user.
    async fn upsert(
        &self,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<(), AuthError>;
}
