//! Handlers for the `/notes` resource: catalog, detail, upload, delete.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use campusnotes_core::error::CoreError;
use campusnotes_core::types::{DbId, Timestamp};
use campusnotes_core::{catalog, storage, upload};
use campusnotes_db::models::note::{CatalogFilter, CreateNote, NoteSummary};
use campusnotes_db::models::review::ReviewWithAuthor;
use campusnotes_db::repositories::{NoteRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A note as rendered in API responses: summary row plus the derived
/// `file_size_mb`.
#[derive(Debug, Serialize)]
pub struct NoteData {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub branch: String,
    pub year: i16,
    pub subject: String,
    pub file_name: String,
    pub file_size_bytes: i64,
    pub file_size_mb: f64,
    pub uploader_id: DbId,
    pub uploader_username: String,
    pub upload_date: Timestamp,
    pub download_count: i64,
    pub is_premium_preview: bool,
    pub average_rating: f64,
    pub review_count: i64,
}

impl From<NoteSummary> for NoteData {
    fn from(note: NoteSummary) -> Self {
        let file_size_mb = upload::file_size_mb(note.file_size_bytes);
        NoteData {
            id: note.id,
            title: note.title,
            description: note.description,
            branch: note.branch,
            year: note.year,
            subject: note.subject,
            file_name: note.file_name,
            file_size_bytes: note.file_size_bytes,
            file_size_mb,
            uploader_id: note.uploader_id,
            uploader_username: note.uploader_username,
            upload_date: note.upload_date,
            download_count: note.download_count,
            is_premium_preview: note.is_premium_preview,
            average_rating: note.average_rating,
            review_count: note.review_count,
        }
    }
}

/// Note detail payload: the note, its reviews newest-first, and whether the
/// requesting user (when authenticated) already reviewed it.
#[derive(Debug, Serialize)]
pub struct NoteDetailData {
    pub note: NoteData,
    pub reviews: Vec<ReviewWithAuthor>,
    /// `None` for anonymous requests.
    pub user_has_reviewed: Option<bool>,
}

/// Branch and year choices for upload and search forms.
#[derive(Debug, Serialize)]
pub struct CatalogOptions {
    pub branches: Vec<BranchOption>,
    pub years: Vec<i16>,
}

#[derive(Debug, Serialize)]
pub struct BranchOption {
    pub code: &'static str,
    pub label: &'static str,
}

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /notes`.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub branch: Option<String>,
    pub year: Option<i16>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a note summary or fail with 404.
async fn ensure_note_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<NoteSummary> {
    NoteRepo::find_summary_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Note", id }))
}

// ---------------------------------------------------------------------------
// GET /catalog-options
// ---------------------------------------------------------------------------

/// The valid branch codes (with display labels) and study years.
pub async fn catalog_options() -> Json<DataResponse<CatalogOptions>> {
    Json(DataResponse {
        data: CatalogOptions {
            branches: catalog::BRANCH_LABELS
                .iter()
                .map(|&(code, label)| BranchOption { code, label })
                .collect(),
            years: (catalog::YEAR_MIN..=catalog::YEAR_MAX).collect(),
        },
    })
}

// ---------------------------------------------------------------------------
// GET /notes
// ---------------------------------------------------------------------------

/// Search and filter the catalog, most recently uploaded first.
///
/// `search` OR-matches title/description/subject case-insensitively; `branch`
/// and `year` are exact filters AND-combined with it. No pagination.
pub async fn catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> AppResult<Json<DataResponse<Vec<NoteData>>>> {
    if let Some(ref branch) = params.branch {
        catalog::validate_branch(branch)?;
    }
    if let Some(year) = params.year {
        catalog::validate_year(year)?;
    }

    let filter = CatalogFilter {
        search: params.search,
        branch: params.branch,
        year: params.year,
    };

    let notes = NoteRepo::search(&state.pool, &filter).await?;
    let data = notes.into_iter().map(NoteData::from).collect();
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// GET /notes/{id}
// ---------------------------------------------------------------------------

/// Note detail with reviews. Anonymous requests are served too; only
/// `user_has_reviewed` depends on authentication.
pub async fn detail(
    OptionalAuthUser(user): OptionalAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<NoteDetailData>>> {
    let note = ensure_note_exists(&state.pool, id).await?;
    let reviews = ReviewRepo::list_by_note(&state.pool, id).await?;

    let user_has_reviewed = match user {
        Some(user) => Some(ReviewRepo::exists_for(&state.pool, id, user.user_id).await?),
        None => None,
    };

    Ok(Json(DataResponse {
        data: NoteDetailData {
            note: NoteData::from(note),
            reviews,
            user_has_reviewed,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /upload-notes
// ---------------------------------------------------------------------------

/// Create a note from a multipart form (`title`, `description`, `branch`,
/// `year`, `subject`, `file`).
///
/// All validation runs before the file is written; a failed insert removes
/// the file again so no partial state survives a rejected upload.
pub async fn upload(
    user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<NoteData>>)> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut branch: Option<String> = None;
    let mut year: Option<i16> = None;
    let mut subject: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => title = Some(read_text(field).await?),
            "description" => description = Some(read_text(field).await?),
            "branch" => branch = Some(read_text(field).await?),
            "year" => {
                let text = read_text(field).await?;
                let parsed: i16 = text
                    .trim()
                    .parse()
                    .map_err(|_| AppError::BadRequest(format!("Invalid year '{text}'")))?;
                year = Some(parsed);
            }
            "subject" => subject = Some(read_text(field).await?),
            "file" => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| AppError::BadRequest("File field has no filename".into()))?
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((filename, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    let title = require_field(title, "title")?;
    let description = require_field(description, "description")?;
    let branch = require_field(branch, "branch")?;
    let year = year.ok_or_else(|| AppError::BadRequest("Missing required field 'year'".into()))?;
    let subject = require_field(subject, "subject")?;
    let (file_name, file_bytes) =
        file.ok_or_else(|| AppError::BadRequest("Missing required field 'file'".into()))?;

    if title.len() > 200 {
        return Err(AppError::BadRequest(
            "Title must be at most 200 characters".into(),
        ));
    }
    if subject.len() > 100 {
        return Err(AppError::BadRequest(
            "Subject must be at most 100 characters".into(),
        ));
    }
    catalog::validate_branch(&branch)?;
    catalog::validate_year(year)?;
    upload::validate_upload(&file_name, file_bytes.len() as i64)?;

    // Validation passed; write the blob, then the row.
    let file_path = storage::object_path(chrono::Utc::now());
    let abs_path = state.config.media_root.join(&file_path);
    if let Some(parent) = abs_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create media dir: {e}")))?;
    }
    tokio::fs::write(&abs_path, &file_bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store file: {e}")))?;

    let input = CreateNote {
        title,
        description,
        branch,
        year,
        subject,
        file_path,
        file_name,
        file_size_bytes: file_bytes.len() as i64,
        uploader_id: user.user_id,
    };

    let note = match NoteRepo::create(&state.pool, &input).await {
        Ok(note) => note,
        Err(err) => {
            // Keep the media root consistent with the database.
            if let Err(cleanup_err) = tokio::fs::remove_file(&abs_path).await {
                tracing::warn!(path = %abs_path.display(), error = %cleanup_err,
                    "Failed to remove orphaned upload");
            }
            return Err(err.into());
        }
    };

    tracing::info!(
        note_id = note.id,
        user_id = user.user_id,
        branch = %note.branch,
        year = note.year,
        size_bytes = note.file_size_bytes,
        "Note uploaded",
    );

    let summary = ensure_note_exists(&state.pool, note.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: NoteData::from(summary),
        }),
    ))
}

// ---------------------------------------------------------------------------
// DELETE /notes/{id}
// ---------------------------------------------------------------------------

/// Delete a note. Only the uploader may delete; reviews cascade at the
/// database level and the stored blob is removed best-effort.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let note = NoteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Note", id }))?;

    if note.uploader_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not authorized to delete this note".into(),
        )));
    }

    NoteRepo::delete(&state.pool, id).await?;

    let abs_path = state.config.media_root.join(&note.file_path);
    if let Err(err) = tokio::fs::remove_file(&abs_path).await {
        tracing::warn!(note_id = id, path = %abs_path.display(), error = %err,
            "Failed to remove stored file for deleted note");
    }

    tracing::info!(note_id = id, user_id = user.user_id, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

fn require_field(value: Option<String>, name: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::BadRequest(format!(
            "Missing required field '{name}'"
        ))),
    }
}
