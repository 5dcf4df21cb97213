use crate::types::DbId;

/// Domain error taxonomy shared across the repository and API layers.
///
/// Every variant is recovered at the handler boundary and surfaced as a JSON
/// error body; none propagate as unhandled faults under normal operation.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Only PDF files are allowed (got '{0}')")]
    InvalidFileType(String),

    #[error("File size must be at most 10MB (got {size_bytes} bytes)")]
    FileTooLarge { size_bytes: i64 },

    #[error("Rating must be between 1 and 5 (got {0})")]
    RatingOutOfRange(i16),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
