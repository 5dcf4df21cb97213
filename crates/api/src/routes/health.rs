//! Liveness endpoint, mounted at the root (not under `/api/v1`).

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Routes: `GET /health`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
///
/// Reports the crate version and whether the database answers a trivial
/// query. Always 200; a broken database shows as `"db_healthy": false`.
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_healthy = campusnotes_db::health_check(&state.pool).await.is_ok();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "db_healthy": db_healthy,
    }))
}
