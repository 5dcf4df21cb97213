//! User account model (owned by the auth subsystem).

use serde::Serialize;
use sqlx::FromRow;

use campusnotes_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// The password hash is deliberately not serialized.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new user. The hash must already be a PHC string.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Public user info safe to embed in API responses.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        UserInfo {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
