//! Request handlers, one module per use case.
//!
//! Handlers orchestrate validation (`campusnotes_core`), persistence
//! (`campusnotes_db` repositories), and response rendering, mapping errors
//! via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod dashboard;
pub mod downloads;
pub mod home;
pub mod notes;
pub mod reviews;
