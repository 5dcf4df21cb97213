use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is internally reference-counted and the config
/// sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: campusnotes_db::DbPool,
    /// Server configuration (media root, JWT secrets, timeouts).
    pub config: Arc<ServerConfig>,
}
