// src/state.rs

use crate::config::Config;
use axum::extract::FromRef;
use sqlx::SqlitePool;

/// Shared by every handler. Handlers extract the part they need through `FromRef`:
/// the pool for queries, the config for session signing and the admin code.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self { pool, config }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
