/**
 * Application State Management
 *
 * `AppState` is the central state container shared by every handler: the
 * SQLite connection pool and the server configuration.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only what they use,
 * following Axum's recommended pattern:
 *
 * ```rust
 * use allynet::backend::server::state::AppState;
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     let _ = pool;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::server::config::ServerConfig;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Immutable server configuration (JWT secret, upload limits, ...)
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: ServerConfig) -> Self {
        Self {
            db_pool,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
