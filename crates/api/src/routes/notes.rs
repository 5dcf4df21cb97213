//! Route definitions for the `/notes` resource and note upload.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{downloads, notes, reviews};
use crate::state::AppState;

/// Routes for the notes catalog and per-note operations.
///
/// ```text
/// GET    /catalog-options        branch/year choices (public)
/// GET    /notes                  catalog (public)
/// GET    /notes/{id}             detail (public)
/// DELETE /notes/{id}             delete (owner only)
/// POST   /notes/{id}/reviews     submit review (auth)
/// GET    /notes/{id}/download    download file (auth)
/// POST   /upload-notes           create note (auth, multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/catalog-options", get(notes::catalog_options))
        .route("/notes", get(notes::catalog))
        .route("/notes/{id}", get(notes::detail).delete(notes::delete))
        .route("/notes/{id}/reviews", post(reviews::submit))
        .route("/notes/{id}/download", get(downloads::download))
        .route("/upload-notes", post(notes::upload))
}
