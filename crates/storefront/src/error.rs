//! Form validation and submission errors.

use thiserror::Error;

use stitchhouse_api::ApiError;
use stitchhouse_core::Email;

/// A required field is missing or malformed. Caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Form field the message refers to.
    pub field: &'static str,
    /// User-facing message.
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Why a form submission did not go through.
#[derive(Debug, Error)]
pub enum FormError {
    /// Client-side validation failed; nothing was sent.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Trimmed value of a required text field.
pub(crate) fn required(
    field: &'static str,
    value: &str,
    message: &str,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, message));
    }
    Ok(trimmed.to_string())
}

/// Trimmed value of an optional text field, `None` when blank.
pub(crate) fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn email(value: &str) -> Result<Email, ValidationError> {
    Email::parse(value).map_err(|e| ValidationError::new("email", e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "  Sam ", "Name is required"), Ok("Sam".to_string()));
        let err = required("name", "   ", "Name is required").unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_email_message_is_user_facing() {
        assert_eq!(
            email("nope").unwrap_err().message,
            "Please enter a valid email address"
        );
        assert_eq!(email("").unwrap_err().message, "Email is required");
    }
}
