//! Review model: one user's rating/comment on one note.

use serde::Serialize;
use sqlx::FromRow;

use campusnotes_core::types::{DbId, Timestamp};

/// A row from the `reviews` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub id: DbId,
    pub note_id: DbId,
    pub user_id: DbId,
    pub rating: i16,
    pub comment: String,
    pub created_at: Timestamp,
}

/// A review joined with the reviewer's username, for note detail pages.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReviewWithAuthor {
    pub id: DbId,
    pub note_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub rating: i16,
    pub comment: String,
    pub created_at: Timestamp,
}

/// A review joined with the reviewed note's title, for the dashboard.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReviewWithNote {
    pub id: DbId,
    pub note_id: DbId,
    pub note_title: String,
    pub rating: i16,
    pub comment: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a new review.
#[derive(Debug)]
pub struct CreateReview {
    pub note_id: DbId,
    pub user_id: DbId,
    pub rating: i16,
    pub comment: String,
}
