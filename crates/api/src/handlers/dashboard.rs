//! Handler for the authenticated user's dashboard.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use campusnotes_db::models::review::ReviewWithNote;
use campusnotes_db::repositories::{NoteRepo, ReviewRepo};

use crate::error::AppResult;
use crate::handlers::notes::NoteData;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Dashboard payload: the user's uploads (newest first), their aggregate
/// totals, and the reviews they have written.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub notes: Vec<NoteData>,
    pub total_uploads: i64,
    pub total_downloads: i64,
    pub reviews: Vec<ReviewWithNote>,
}

/// GET /api/v1/dashboard
pub async fn dashboard(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardData>>> {
    let notes = NoteRepo::list_by_uploader(&state.pool, user.user_id).await?;
    let totals = NoteRepo::uploader_totals(&state.pool, user.user_id).await?;
    let reviews = ReviewRepo::list_by_user(&state.pool, user.user_id).await?;

    Ok(Json(DataResponse {
        data: DashboardData {
            notes: notes.into_iter().map(NoteData::from).collect(),
            total_uploads: totals.total_uploads,
            total_downloads: totals.total_downloads,
            reviews,
        },
    }))
}
