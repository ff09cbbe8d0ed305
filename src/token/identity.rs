//! Email identity helpers.

use regex::Regex;

/// Normalize an email so lookups are case and whitespace insensitive.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
#[must_use]
pub fn valid_email(email_normalized: &str) -> bool {
    Regex::new(r"^[^@\s/]+@[^@\s/]+\.[^@\s/]+$")
        .is_ok_and(|regex| regex.is_match(email_normalized))
}
