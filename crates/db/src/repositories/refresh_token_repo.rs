//! Repository for the `refresh_tokens` table.
//!
//! The table holds at most one row per user (`user_id` is the primary key).
//! Rotation is a single `INSERT ... ON CONFLICT DO UPDATE` statement, so a
//! failed rotation leaves the previous token untouched and concurrent
//! rotations for the same user resolve to last-writer-wins.

use keygate_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::refresh_token::RefreshTokenRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, token_hash, expires_at, rotated_at, created_at";

/// Provides the single-active-token-per-user registry.
pub struct RefreshTokenRepo;

impl RefreshTokenRepo {
    /// Insert or overwrite the refresh token for a user (rotation).
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<RefreshTokenRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO UPDATE
                SET token_hash = EXCLUDED.token_hash,
                    expires_at = EXCLUDED.expires_at,
                    rotated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshTokenRow>(&query)
            .bind(user_id)
            .bind(token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Reverse lookup: resolve the owner of a presented token hash.
    ///
    /// Only matches non-expired rows; an expired token resolves to nobody.
    pub async fn find_user_by_token(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT user_id FROM refresh_tokens
             WHERE token_hash = $1 AND expires_at > NOW()",
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await
    }

    /// True iff the stored (non-expired) token for `user_id` matches `token_hash`.
    pub async fn exists(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM refresh_tokens
                 WHERE user_id = $1 AND token_hash = $2 AND expires_at > NOW()
             )",
        )
        .bind(user_id)
        .bind(token_hash)
        .fetch_one(pool)
        .await
    }

    /// Delete expired rows. Returns the count of deleted rows.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
