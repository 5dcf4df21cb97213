//! Route registration, one module per resource.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod notes;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /home                       recent notes + site stats (public)
/// /catalog-options            branch/year choices (public)
///
/// /notes                      catalog search/filter (public)
/// /notes/{id}                 detail + reviews (public, personalizes when authed)
/// /notes/{id}/reviews         submit review (POST, auth)
/// /notes/{id}/download        stream file, count download (auth)
/// /notes/{id}                 delete (DELETE, owner only)
/// /upload-notes               create note (POST multipart, auth)
///
/// /dashboard                  own notes + stats (auth)
///
/// /auth/signup                create account (public)
/// /auth/login                 login (public)
/// /auth/refresh               rotate refresh token (public)
/// /auth/logout                revoke sessions (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(handlers::home::home))
        .merge(notes::router())
        .merge(dashboard::router())
        .nest("/auth", auth::router())
}
