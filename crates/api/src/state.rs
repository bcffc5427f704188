use std::sync::Arc;

use crate::engine::PgSessionEngine;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (health checks).
    pub pool: keygate_db::DbPool,
    /// The session engine with its signer and sqlx-backed stores.
    pub engine: Arc<PgSessionEngine>,
}
