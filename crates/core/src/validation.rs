//! Input validation and sanitization
//!
//! Checks caller input before anything touches the network:
//! - Mobile numbers, passwords, names and emails
//! - Resource identifiers
//! - Request bodies via the fluent [`Validator`]
//!
//! # Example
//!
//! ```rust
//! use spinovo_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("name", "Ravi")
//!     .mobile("mobile", "9876543210")
//!     .min_length("password", "secret-pass", 8)
//!     .validate();
//!
//! assert!(result.is_ok());
//! ```

use crate::error::AppError;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Length bounds for mobile numbers
pub const MOBILE_LENGTH: (usize, usize) = (10, 15);

/// Length bounds for passwords
pub const PASSWORD_LENGTH: (usize, usize) = (8, 128);

/// Length bounds for person names
pub const NAME_LENGTH: (usize, usize) = (2, 100);

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));
static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid regex"));
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

fn within(value: &str, (min, max): (usize, usize)) -> bool {
    let len = value.chars().count();
    (min..=max).contains(&len)
}

/// Digits only, 10 to 15 characters
pub fn is_valid_mobile(value: &str) -> bool {
    within(value, MOBILE_LENGTH) && DIGITS.is_match(value)
}

/// Non-empty, 8 to 128 characters
pub fn is_valid_password(value: &str) -> bool {
    within(value, PASSWORD_LENGTH)
}

/// Letters and spaces, 2 to 100 characters
pub fn is_valid_name(value: &str) -> bool {
    within(value, NAME_LENGTH) && NAME.is_match(value)
}

/// Empty (email is optional) or a plausible address
pub fn is_valid_email(value: &str) -> bool {
    value.is_empty() || EMAIL.is_match(value)
}

/// Whether a path identifier is usable
///
/// Rejects empty ids and the literal strings `undefined` and `null`.
pub fn is_valid_id(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "undefined" && value != "null"
}

/// Fail with `Invalid <what> ID provided` unless the id is usable
pub fn require_id(what: &str, value: &str) -> Result<(), AppError> {
    if is_valid_id(value) {
        Ok(())
    } else {
        debug!(id = value, "Invalid {what} ID provided");
        Err(AppError::validation(format!("Invalid {what} ID provided")))
    }
}

/// Trim surrounding whitespace
pub fn sanitize_string(value: &str) -> String {
    value.trim().to_string()
}

/// Strip everything that is not an ASCII digit
pub fn sanitize_mobile(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Trim and collapse inner whitespace runs to a single space
pub fn sanitize_name(value: &str) -> String {
    WHITESPACE.replace_all(value.trim(), " ").into_owned()
}

/// A single failed check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Fluent validator builder
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(mut self, field: &str, message: impl Into<String>) -> Self {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
        self
    }

    /// Value must not be blank
    pub fn required(self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.fail(field, "is required")
        } else {
            self
        }
    }

    /// Value must have at least `min` characters
    pub fn min_length(self, field: &str, value: &str, min: usize) -> Self {
        if value.chars().count() < min {
            self.fail(field, format!("must be at least {min} characters"))
        } else {
            self
        }
    }

    /// Value must have at most `max` characters
    pub fn max_length(self, field: &str, value: &str, max: usize) -> Self {
        if value.chars().count() > max {
            self.fail(field, format!("must be at most {max} characters"))
        } else {
            self
        }
    }

    /// Value must be a valid mobile number
    pub fn mobile(self, field: &str, value: &str) -> Self {
        if is_valid_mobile(value) {
            self
        } else {
            self.fail(field, "must be 10-15 digits")
        }
    }

    /// Value must be empty or a valid email
    pub fn email(self, field: &str, value: &str) -> Self {
        if is_valid_email(value) {
            self
        } else {
            self.fail(field, "must be a valid email address")
        }
    }

    /// Numeric value must not be negative
    pub fn non_negative(self, field: &str, value: f64) -> Self {
        if value.is_finite() && value >= 0.0 {
            self
        } else {
            self.fail(field, "must not be negative")
        }
    }

    /// Collected errors
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Finish, turning collected errors into a single `ValidationError`
    pub fn validate(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            return Ok(());
        }

        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        let message = format!("Validation failed: {}", messages.join("; "));
        debug!(errors = messages.len(), "{message}");
        Err(AppError::validation(message))
    }
}
