//! Route definition for the user dashboard.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes: `GET /dashboard` (requires auth).
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard::dashboard))
}
