//! Catalog enumerations and search helpers.
//!
//! Branch and year are fixed enumerations classifying a note's academic
//! context. They are stored as plain TEXT / SMALLINT columns and validated
//! here before anything reaches the database.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------------

/// Valid branch codes, in display order.
pub const BRANCHES: &[&str] = &["CSE", "ECE", "EEE", "MECH", "CIVIL", "IT"];

/// Human-readable branch labels, parallel to [`BRANCHES`].
pub const BRANCH_LABELS: &[(&str, &str)] = &[
    ("CSE", "Computer Science Engineering"),
    ("ECE", "Electronics & Communication"),
    ("EEE", "Electrical & Electronics"),
    ("MECH", "Mechanical Engineering"),
    ("CIVIL", "Civil Engineering"),
    ("IT", "Information Technology"),
];

/// Validate that `branch` is one of the known branch codes.
pub fn validate_branch(branch: &str) -> Result<(), CoreError> {
    if BRANCHES.contains(&branch) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid branch '{branch}'. Must be one of: {BRANCHES:?}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Year
// ---------------------------------------------------------------------------

/// First year of study.
pub const YEAR_MIN: i16 = 1;

/// Final year of study.
pub const YEAR_MAX: i16 = 4;

/// Validate that `year` is within the study-year enumeration.
pub fn validate_year(year: i16) -> Result<(), CoreError> {
    if (YEAR_MIN..=YEAR_MAX).contains(&year) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid year {year}. Must be between {YEAR_MIN} and {YEAR_MAX}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Build an ILIKE pattern performing a literal substring match on `search`.
///
/// LIKE metacharacters in the term are escaped, so `a_c` matches only the
/// three characters `a_c`, never "abc". An empty or whitespace-only term
/// yields `"%%"`, which matches every row, so repositories can bind the
/// pattern unconditionally.
pub fn build_like_pattern(search: &str) -> String {
    let term = search.trim();
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("%{escaped}%")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
