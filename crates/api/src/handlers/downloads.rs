//! Handler for note file downloads.
//!
//! The download counter moves through a single atomic UPDATE *before* the
//! file stream starts, so the count records attempts: a stream that fails
//! afterwards still counted, and the increment is not rolled back.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use tokio_util::io::ReaderStream;

use campusnotes_core::error::CoreError;
use campusnotes_core::types::DbId;
use campusnotes_db::repositories::NoteRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/notes/{id}/download
///
/// Increment the note's download counter, then stream the stored PDF as an
/// attachment named after the original upload filename.
pub async fn download(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let note = NoteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Note", id }))?;

    let new_count = NoteRepo::increment_download_count(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Note", id }))?;

    tracing::info!(
        note_id = id,
        user_id = user.user_id,
        download_count = new_count,
        "Download started",
    );

    let abs_path = state.config.media_root.join(&note.file_path);
    let file = tokio::fs::File::open(&abs_path)
        .await
        .map_err(|e| AppError::DownloadFailed(e.to_string()))?;

    let stream = ReaderStream::new(file);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_LENGTH, note.file_size_bytes.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                sanitize_filename(&note.file_name)
            ),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// Make a stored filename safe for a quoted Content-Disposition value:
/// strip quotes, backslashes, and control characters.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect()
}
