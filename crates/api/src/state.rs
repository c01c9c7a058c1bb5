use std::sync::Arc;

use notifyhub_delivery::Dispatcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: notifyhub_db::DbPool,
    /// Server configuration (JWT validation, CORS, timeouts).
    pub config: Arc<ServerConfig>,
    /// Channel transports used by the fan-out engine.
    pub dispatcher: Arc<Dispatcher>,
}
