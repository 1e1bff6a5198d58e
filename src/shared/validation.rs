//! Input validation helpers
//!
//! Pure predicates used by the registration and login flows. The email check
//! is a single structural pattern and deliberately permissive; it is not an
//! RFC 5322 parser.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::shared::error::SharedError;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum accepted password length, in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Outcome of [`check_password_strength`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub valid: bool,
    pub reasons: Vec<String>,
}

/// Returns `true` when `email` looks like `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check a candidate password against the length rules.
///
/// Every failing rule contributes one entry to `reasons`; `valid` is true
/// only when `reasons` is empty.
pub fn check_password_strength(password: &str) -> PasswordStrength {
    let length = password.chars().count();
    let mut reasons = Vec::new();

    if length < MIN_PASSWORD_LENGTH {
        reasons.push(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        ));
    }
    if length > MAX_PASSWORD_LENGTH {
        reasons.push(format!(
            "Password must be less than {} characters",
            MAX_PASSWORD_LENGTH
        ));
    }

    PasswordStrength {
        valid: reasons.is_empty(),
        reasons,
    }
}

/// Canonical form of an email address used as the unique user key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a registration payload before any store is touched
pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), SharedError> {
    if name.trim().is_empty() {
        return Err(SharedError::validation("name", "Name is required"));
    }
    if !is_valid_email(email.trim()) {
        return Err(SharedError::validation(
            "email",
            "Please provide a valid email address",
        ));
    }
    let strength = check_password_strength(password);
    if !strength.valid {
        return Err(SharedError::validation("password", strength.reasons.join("; ")));
    }
    Ok(())
}

/// Validate a login payload. Only the shape is checked here; strength rules
/// apply at registration time.
pub fn validate_login(email: &str, password: &str) -> Result<(), SharedError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(SharedError::validation(
            "credentials",
            "Email and password are required",
        ));
    }
    if !is_valid_email(email.trim()) {
        return Err(SharedError::validation(
            "email",
            "Please provide a valid email address",
        ));
    }
    Ok(())
}
