//! Refresh-token row model.

use keygate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A refresh-token row from the `refresh_tokens` table.
///
/// At most one row exists per user; rotation overwrites it in place.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenRow {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub rotated_at: Timestamp,
    pub created_at: Timestamp,
}
