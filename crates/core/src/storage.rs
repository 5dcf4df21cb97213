//! Media storage path helpers.
//!
//! Uploaded files live under a configurable media root, namespaced by the
//! year and month of upload (`notes/YYYY/MM/`). The stored object name is a
//! fresh UUID so concurrent uploads of identically-named files never
//! collide; the original filename is kept as a database column for the
//! download Content-Disposition header.

use chrono::Datelike;
use uuid::Uuid;

use crate::types::Timestamp;
use crate::upload::ALLOWED_EXTENSION;

/// Top-level media-root directory for note files.
pub const NOTES_PREFIX: &str = "notes";

/// Media-root-relative directory for an upload at `now`: `notes/YYYY/MM`.
pub fn object_dir(now: Timestamp) -> String {
    format!("{NOTES_PREFIX}/{:04}/{:02}", now.year(), now.month())
}

/// Media-root-relative path for a new stored object: `notes/YYYY/MM/<uuid>.pdf`.
pub fn object_path(now: Timestamp) -> String {
    format!("{}/{}.{ALLOWED_EXTENSION}", object_dir(now), Uuid::new_v4())
}
