//! Note model: one uploaded PDF document with its academic classification.

use serde::Serialize;
use sqlx::FromRow;

use campusnotes_core::types::{DbId, Timestamp};

/// A row from the `notes` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub branch: String,
    pub year: i16,
    pub subject: String,
    pub file_path: String,
    pub file_name: String,
    pub file_size_bytes: i64,
    pub uploader_id: DbId,
    pub upload_date: Timestamp,
    pub download_count: i64,
    pub is_premium_preview: bool,
}

/// A note row joined with its review aggregates.
///
/// `average_rating` is 0 for a note with no reviews.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NoteSummary {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub branch: String,
    pub year: i16,
    pub subject: String,
    pub file_name: String,
    pub file_size_bytes: i64,
    pub uploader_id: DbId,
    pub uploader_username: String,
    pub upload_date: Timestamp,
    pub download_count: i64,
    pub is_premium_preview: bool,
    pub average_rating: f64,
    pub review_count: i64,
}

/// DTO for inserting a new note. The file must already be validated and
/// written under the media root.
#[derive(Debug)]
pub struct CreateNote {
    pub title: String,
    pub description: String,
    pub branch: String,
    pub year: i16,
    pub subject: String,
    pub file_path: String,
    pub file_name: String,
    pub file_size_bytes: i64,
    pub uploader_id: DbId,
}

/// Catalog filters: free-text search OR-combined over title/description/
/// subject, branch and year AND-combined with it.
#[derive(Debug, Default)]
pub struct CatalogFilter {
    pub search: Option<String>,
    pub branch: Option<String>,
    pub year: Option<i16>,
}

/// Per-uploader aggregate totals for the dashboard.
#[derive(Debug, Serialize, FromRow)]
pub struct UploaderTotals {
    pub total_uploads: i64,
    pub total_downloads: i64,
}

/// Site-wide aggregate totals for the home page.
#[derive(Debug, Serialize, FromRow)]
pub struct SiteTotals {
    pub total_notes: i64,
    pub total_downloads: i64,
}
