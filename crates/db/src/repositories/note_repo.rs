//! Repository for the `notes` table.

use sqlx::PgPool;

use campusnotes_core::catalog::build_like_pattern;
use campusnotes_core::types::DbId;

use crate::models::note::{
    CatalogFilter, CreateNote, Note, NoteSummary, SiteTotals, UploaderTotals,
};

/// Column list for plain `notes` rows.
const COLUMNS: &str = "id, title, description, branch, year, subject, file_path, file_name, \
    file_size_bytes, uploader_id, upload_date, download_count, is_premium_preview";

/// Select list for [`NoteSummary`]: note columns plus uploader username and
/// review aggregates. `average_rating` is 0 when a note has no reviews.
const SUMMARY_SELECT: &str = "SELECT n.id, n.title, n.description, n.branch, n.year, n.subject, \
    n.file_name, n.file_size_bytes, n.uploader_id, u.username AS uploader_username, \
    n.upload_date, n.download_count, n.is_premium_preview, \
    COALESCE(AVG(r.rating), 0)::float8 AS average_rating, \
    COUNT(r.id) AS review_count \
    FROM notes n \
    JOIN users u ON u.id = n.uploader_id \
    LEFT JOIN reviews r ON r.note_id = n.id";

const SUMMARY_GROUP_BY: &str = "GROUP BY n.id, u.username";

/// Provides CRUD and aggregate queries for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a new note, returning the created row.
    ///
    /// `upload_date` and `download_count` take their column defaults and are
    /// never written by application code after this point (the counter only
    /// moves through [`NoteRepo::increment_download_count`]).
    pub async fn create(pool: &PgPool, input: &CreateNote) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes
                (title, description, branch, year, subject, file_path, file_name,
                 file_size_bytes, uploader_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.branch)
            .bind(input.year)
            .bind(&input.subject)
            .bind(&input.file_path)
            .bind(&input.file_name)
            .bind(input.file_size_bytes)
            .bind(input.uploader_id)
            .fetch_one(pool)
            .await
    }

    /// Find a note by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a note with its review aggregates.
    pub async fn find_summary_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<NoteSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE n.id = $1 {SUMMARY_GROUP_BY}");
        sqlx::query_as::<_, NoteSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Search the catalog, most recent upload first.
    ///
    /// The free-text term matches title, description, or subject
    /// case-insensitively (OR); branch and year filters are exact and
    /// AND-combined with the search and each other. Absent filters are bound
    /// as match-all sentinels so the statement stays static.
    pub async fn search(
        pool: &PgPool,
        filter: &CatalogFilter,
    ) -> Result<Vec<NoteSummary>, sqlx::Error> {
        let pattern = build_like_pattern(filter.search.as_deref().unwrap_or(""));
        let branch = filter.branch.as_deref().unwrap_or("");
        let year = filter.year.unwrap_or(0);

        let query = format!(
            "{SUMMARY_SELECT}
             WHERE (n.title ILIKE $1 OR n.description ILIKE $1 OR n.subject ILIKE $1)
               AND ($2 = '' OR n.branch = $2)
               AND ($3 = 0 OR n.year = $3)
             {SUMMARY_GROUP_BY}
             ORDER BY n.upload_date DESC, n.id DESC"
        );
        sqlx::query_as::<_, NoteSummary>(&query)
            .bind(&pattern)
            .bind(branch)
            .bind(year)
            .fetch_all(pool)
            .await
    }

    /// The `limit` most recently uploaded notes.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<NoteSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT} {SUMMARY_GROUP_BY} ORDER BY n.upload_date DESC, n.id DESC LIMIT $1"
        );
        sqlx::query_as::<_, NoteSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// All notes by one uploader, most recent first.
    pub async fn list_by_uploader(
        pool: &PgPool,
        uploader_id: DbId,
    ) -> Result<Vec<NoteSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT} WHERE n.uploader_id = $1 {SUMMARY_GROUP_BY}
             ORDER BY n.upload_date DESC, n.id DESC"
        );
        sqlx::query_as::<_, NoteSummary>(&query)
            .bind(uploader_id)
            .fetch_all(pool)
            .await
    }

    /// Atomically increment a note's download counter, returning the new
    /// value, or `None` when the note does not exist.
    ///
    /// A single UPDATE keeps concurrent downloads from losing increments;
    /// the counter is never written read-modify-write in application code.
    pub async fn increment_download_count(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE notes SET download_count = download_count + 1
             WHERE id = $1
             RETURNING download_count",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a note by ID. Reviews cascade at the database level.
    ///
    /// Returns `true` when a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Upload count and summed download count for one uploader.
    pub async fn uploader_totals(
        pool: &PgPool,
        uploader_id: DbId,
    ) -> Result<UploaderTotals, sqlx::Error> {
        sqlx::query_as::<_, UploaderTotals>(
            "SELECT COUNT(*) AS total_uploads,
                    COALESCE(SUM(download_count), 0)::bigint AS total_downloads
             FROM notes WHERE uploader_id = $1",
        )
        .bind(uploader_id)
        .fetch_one(pool)
        .await
    }

    /// Site-wide note count and summed download count, for the home page.
    pub async fn site_totals(pool: &PgPool) -> Result<SiteTotals, sqlx::Error> {
        sqlx::query_as::<_, SiteTotals>(
            "SELECT COUNT(*) AS total_notes,
                    COALESCE(SUM(download_count), 0)::bigint AS total_downloads
             FROM notes",
        )
        .fetch_one(pool)
        .await
    }
}
