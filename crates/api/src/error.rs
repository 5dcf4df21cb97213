//! HTTP error surface.
//!
//! Every handler returns [`AppResult`]. A failure renders as JSON of the
//! shape `{ "error": <human message>, "code": <stable machine code> }`, with
//! the status and code derived from the wrapped error. Internal details
//! (database messages, IO errors) are logged, never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use campusnotes_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `campusnotes_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The stored file could not be opened while serving a download. By this
    /// point the download counter has already been incremented and stays
    /// incremented.
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    /// Status, stable code, and client-safe message for this error.
    fn render(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => render_core(core),
            AppError::Database(err) => render_db(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::DownloadFailed(msg) => {
                tracing::error!(error = %msg, "Download stream failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DOWNLOAD_FAILED",
                    format!("Error downloading file: {msg}"),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.render();
        let body = json!({ "error": message, "code": code });
        (status, axum::Json(body)).into_response()
    }
}

fn render_core(core: &CoreError) -> (StatusCode, &'static str, String) {
    use CoreError::*;
    match core {
        NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        InvalidFileType(_) => (StatusCode::BAD_REQUEST, "INVALID_FILE_TYPE", core.to_string()),
        FileTooLarge { .. } => (StatusCode::BAD_REQUEST, "FILE_TOO_LARGE", core.to_string()),
        RatingOutOfRange(_) => (
            StatusCode::BAD_REQUEST,
            "RATING_OUT_OF_RANGE",
            core.to_string(),
        ),
        Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}

/// Map a sqlx failure onto the HTTP surface.
///
/// `RowNotFound` is a 404. A unique violation (Postgres 23505) on one of the
/// schema's named `uq_` constraints is a 409; for reviews that is the race
/// backstop behind the handler-level duplicate check. Anything else is a
/// logged 500 with the message withheld.
fn render_db(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if matches!(err, sqlx::Error::RowNotFound) {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
        }
    }

    tracing::error!(error = %err, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}
