//! Payload validation helpers
//!
//! Validators return a [`FieldError`] per failure so callers can collect
//! every problem in a request before rejecting it, the way the API
//! reports validation failures as a field/message list.

use crate::utils::error::FieldError;
use chrono::{DateTime, NaiveDate, Utc};

/// Smallest accepted monetary amount for invoices and transactions
pub const MIN_AMOUNT: f64 = 0.01;

/// Message reported for a required field that was not supplied
pub const REQUIRED: &str = "Required";

/// Require a non-empty (post-trim) text value, reporting `message` on failure
pub fn require_text(field: &str, value: &str, message: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(field, message));
    }
    Ok(())
}

/// Require an amount of at least [`MIN_AMOUNT`]
pub fn require_min_amount(field: &str, amount: f64) -> Result<(), FieldError> {
    if !amount.is_finite() || amount < MIN_AMOUNT {
        return Err(FieldError::new(field, "Amount must be greater than 0"));
    }
    Ok(())
}

/// Parse a client-supplied date: RFC 3339 or plain `YYYY-MM-DD`
pub fn parse_client_date(field: &str, value: &str) -> Result<DateTime<Utc>, FieldError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(FieldError::new(field, "Invalid date format"))
}

/// Validate a username: 3-50 chars, letters/digits/underscore/hyphen
pub fn validate_username(username: &str) -> Result<(), FieldError> {
    if username.trim().is_empty() {
        return Err(FieldError::new("username", "username cannot be empty"));
    }

    if username.len() < 3 {
        return Err(FieldError::new(
            "username",
            "username must be at least 3 characters",
        ));
    }

    if username.len() > 50 {
        return Err(FieldError::new(
            "username",
            "username cannot exceed 50 characters",
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(FieldError::new(
            "username",
            "username can only contain letters, numbers, underscores, and hyphens",
        ));
    }

    Ok(())
}

/// Validate an email address shape: local@domain with a dotted domain
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(FieldError::new("email", "email must be a valid address"));
    }

    Ok(())
}

/// Validate password strength: 8-128 chars, 3 of 4 character classes
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    if password.len() < 8 {
        return Err(FieldError::new(
            "password",
            "password must be at least 8 characters",
        ));
    }

    if password.len() > 128 {
        return Err(FieldError::new(
            "password",
            "password cannot exceed 128 characters",
        ));
    }

    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password
        .chars()
        .any(|c| "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c));

    let strength_count = [has_lowercase, has_uppercase, has_digit, has_special]
        .iter()
        .filter(|&&x| x)
        .count();

    if strength_count < 3 {
        return Err(FieldError::new(
            "password",
            "password must contain at least 3 of: lowercase, uppercase, digit, special character",
        ));
    }

    Ok(())
}
