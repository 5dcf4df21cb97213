//! Upload validation for note files.
//!
//! Notes accept a single PDF of at most 10 MB. Validation runs before any
//! byte is written to the media root or any row is inserted, so a rejected
//! upload persists nothing.

use crate::error::CoreError;

/// Maximum accepted file size in bytes (10 MB).
pub const MAX_FILE_SIZE_BYTES: i64 = 10 * 1024 * 1024;

/// The only accepted file extension.
pub const ALLOWED_EXTENSION: &str = "pdf";

/// Validate an uploaded file's name and size.
///
/// Fails with [`CoreError::InvalidFileType`] unless the name ends in `.pdf`
/// (case-insensitive), and with [`CoreError::FileTooLarge`] when the size
/// exceeds [`MAX_FILE_SIZE_BYTES`]. The 10 MB boundary itself is accepted.
pub fn validate_upload(file_name: &str, size_bytes: i64) -> Result<(), CoreError> {
    let has_pdf_extension = file_name
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(ALLOWED_EXTENSION));

    if !has_pdf_extension {
        return Err(CoreError::InvalidFileType(file_name.to_string()));
    }

    if size_bytes > MAX_FILE_SIZE_BYTES {
        return Err(CoreError::FileTooLarge { size_bytes });
    }

    Ok(())
}

/// Stored file size in megabytes, rounded to 2 decimals.
pub fn file_size_mb(size_bytes: i64) -> f64 {
    let mb = size_bytes as f64 / (1024.0 * 1024.0);
    (mb * 100.0).round() / 100.0
}
