//! Input validation helpers shared by the API handlers.
//!
//! The original system validated these fields in the browser before
//! submission; with no browser in front of this server, the same rules are
//! enforced here.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::CoreError;

/// Minimum allowed password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Local part, @, domain with at least one dot. Intentionally loose
    // beyond that; the address is never used for delivery verification.
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"))
}

/// Check that `email` has the shape `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate an email address, returning a domain error on failure.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

/// Clamp a project progress value into the representable 0-100 range.
pub fn clamp_progress(progress: i32) -> i32 {
    progress.clamp(0, 100)
}

/// Reject an invoice due date that is strictly before `today`.
pub fn validate_due_date(due_date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if due_date < today {
        return Err(CoreError::Validation(
            "Due date must not be in the past".into(),
        ));
    }
    Ok(())
}

/// Check that a project's date range is ordered (start before or equal to due).
pub fn validate_date_range(
    start: Option<NaiveDate>,
    due: Option<NaiveDate>,
) -> Result<(), CoreError> {
    if let (Some(start), Some(due)) = (start, due) {
        if start > due {
            return Err(CoreError::Validation(
                "Start date must not be after the due date".into(),
            ));
        }
    }
    Ok(())
}

/// Validate that a password meets minimum strength requirements.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Derive a URL slug from an agency name: lowercase, whitespace runs
/// replaced with single hyphens.
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
