//! Handler for the home page payload: recent notes plus site-wide stats.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use campusnotes_db::repositories::NoteRepo;

use crate::error::AppResult;
use crate::handlers::notes::NoteData;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of notes shown on the home page.
const RECENT_NOTES_LIMIT: i64 = 6;

/// Home page payload.
#[derive(Debug, Serialize)]
pub struct HomeData {
    pub recent_notes: Vec<NoteData>,
    pub total_notes: i64,
    pub total_downloads: i64,
}

/// GET /api/v1/home
///
/// Public. The totals come from SQL aggregates, not per-row sums.
pub async fn home(State(state): State<AppState>) -> AppResult<Json<DataResponse<HomeData>>> {
    let recent = NoteRepo::list_recent(&state.pool, RECENT_NOTES_LIMIT).await?;
    let totals = NoteRepo::site_totals(&state.pool).await?;

    Ok(Json(DataResponse {
        data: HomeData {
            recent_notes: recent.into_iter().map(NoteData::from).collect(),
            total_notes: totals.total_notes,
            total_downloads: totals.total_downloads,
        },
    }))
}
