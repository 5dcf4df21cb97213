//! Handler for review submission on a note.
//!
//! Reviews are write-once: a user rates a note at most once, and nothing in
//! the API updates or deletes an individual review. A duplicate submission
//! is not an error; it returns a warning and leaves state unchanged, the way
//! the detail page flash message behaves.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use campusnotes_core::error::CoreError;
use campusnotes_core::review::validate_rating;
use campusnotes_core::types::DbId;
use campusnotes_db::models::review::{CreateReview, Review};
use campusnotes_db::repositories::{NoteRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::WarningResponse;
use crate::state::AppState;

/// Request body for `POST /notes/{id}/reviews`.
#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    pub rating: i16,
    pub comment: Option<String>,
}

/// POST /api/v1/notes/{id}/reviews
///
/// Submit a rating (1-5) and optional comment. Returns 201 with the created
/// review, or 200 with a `warning` when this user already reviewed the note.
pub async fn submit(
    user: AuthUser,
    State(state): State<AppState>,
    Path(note_id): Path<DbId>,
    Json(input): Json<SubmitReviewRequest>,
) -> AppResult<(StatusCode, Json<WarningResponse<Option<Review>>>)> {
    NoteRepo::find_by_id(&state.pool, note_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Note",
                id: note_id,
            })
        })?;

    validate_rating(input.rating)?;

    if ReviewRepo::exists_for(&state.pool, note_id, user.user_id).await? {
        return Ok((
            StatusCode::OK,
            Json(WarningResponse {
                data: None,
                warning: Some("You have already reviewed this note.".to_string()),
            }),
        ));
    }

    // The uq_reviews_note_user constraint catches the race where two
    // submissions pass the existence check together; the loser surfaces as
    // a 409.
    let review = ReviewRepo::create(
        &state.pool,
        &CreateReview {
            note_id,
            user_id: user.user_id,
            rating: input.rating,
            comment: input.comment.unwrap_or_default(),
        },
    )
    .await?;

    tracing::info!(
        note_id,
        user_id = user.user_id,
        rating = review.rating,
        "Review added",
    );

    Ok((
        StatusCode::CREATED,
        Json(WarningResponse {
            data: Some(review),
            warning: None,
        }),
    ))
}
