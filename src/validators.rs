/// Input validators for admin and public write endpoints
///
/// Each validator returns the cleaned value (trimmed, email lower-cased)
/// or a `ValidationError` that maps to a 400 response.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

pub const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321
pub const MAX_SHORT_TEXT_LENGTH: usize = 100;
pub const MAX_TEXT_LENGTH: usize = 255;
pub const MAX_URL_LENGTH: usize = 500;
/// Descriptions and messages
pub const MAX_LONG_TEXT_LENGTH: usize = 5000;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

lazy_static! {
    // RFC 5322 simplified email regex (practical validation)
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();
}

/// Validates an email address and returns it trimmed and lower-cased.
pub fn is_valid_email(email: &str) -> Result<String, ValidationError> {
    let normalized = email.trim().to_lowercase();

    if normalized.is_empty() {
        return Err(ValidationError::Required("email"));
    }

    if normalized.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong("email", MAX_EMAIL_LENGTH));
    }

    if !EMAIL_REGEX.is_match(&normalized) || normalized.contains('\0') {
        return Err(ValidationError::InvalidFormat("email"));
    }

    Ok(normalized)
}

/// A field that must be present and non-blank.
pub fn required_text(
    value: Option<&str>,
    label: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.map(str::trim).unwrap_or_default();

    if trimmed.is_empty() {
        return Err(ValidationError::Required(label));
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong(label, max));
    }

    Ok(trimmed.to_string())
}

/// Length check for an optional free-text field. Absent stays absent.
pub fn optional_text(
    value: Option<&str>,
    label: &'static str,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong(label, max)),
        _ => Ok(()),
    }
}

pub fn is_valid_rating(rating: i32) -> Result<i32, ValidationError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(ValidationError::OutOfRange("rating", MIN_RATING, MAX_RATING))
    }
}
