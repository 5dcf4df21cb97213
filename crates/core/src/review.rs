//! Review validation.

use crate::error::CoreError;

/// Lowest accepted rating.
pub const RATING_MIN: i16 = 1;

/// Highest accepted rating.
pub const RATING_MAX: i16 = 5;

/// Validate that a rating lies in `[1, 5]`, boundaries included.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (RATING_MIN..=RATING_MAX).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::RatingOutOfRange(rating))
    }
}
