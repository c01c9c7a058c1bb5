//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// GET /health
///
/// Liveness probe: reports service version and database reachability.
/// Always returns 200; a broken database shows up as `db_healthy: false`.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_healthy = notifyhub_db::health_check(&state.pool).await.is_ok();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "db_healthy": db_healthy,
    }))
}
