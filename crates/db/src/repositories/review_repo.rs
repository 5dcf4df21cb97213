//! Repository for the `reviews` table.
//!
//! Reviews are write-once: there is no update or delete path. They are
//! removed only by the `ON DELETE CASCADE` from their note.

use sqlx::PgPool;

use campusnotes_core::types::DbId;

use crate::models::review::{CreateReview, Review, ReviewWithAuthor, ReviewWithNote};

const COLUMNS: &str = "id, note_id, user_id, rating, comment, created_at";

/// Provides create and list operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review, returning the created row.
    ///
    /// The `uq_reviews_note_user` constraint is the race backstop for the
    /// handler-level duplicate check.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (note_id, user_id, rating, comment)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.note_id)
            .bind(input.user_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Whether the given user has already reviewed the given note.
    pub async fn exists_for(
        pool: &PgPool,
        note_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM reviews WHERE note_id = $1 AND user_id = $2)",
        )
        .bind(note_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// All reviews for a note with reviewer usernames, newest first.
    pub async fn list_by_note(
        pool: &PgPool,
        note_id: DbId,
    ) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, ReviewWithAuthor>(
            "SELECT r.id, r.note_id, r.user_id, u.username, r.rating, r.comment, r.created_at
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.note_id = $1
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .bind(note_id)
        .fetch_all(pool)
        .await
    }

    /// All reviews authored by a user with note titles, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ReviewWithNote>, sqlx::Error> {
        sqlx::query_as::<_, ReviewWithNote>(
            "SELECT r.id, r.note_id, n.title AS note_title, r.rating, r.comment, r.created_at
             FROM reviews r
             JOIN notes n ON n.id = r.note_id
             WHERE r.user_id = $1
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
