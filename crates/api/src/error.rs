//! Error taxonomy for backend calls.
//!
//! Three kinds of failure reach callers: transport errors (`Http`),
//! backend-reported failures (`Backend`, carrying the backend's own message
//! when it sent one), and responses that do not have the documented shape
//! (`MalformedResponse`). Validation errors never get this far; they are
//! caught by the page controllers before any call is made.

use thiserror::Error;

/// Errors that can occur when talking to the Stitchhouse backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a failure status or `success: false`.
    #[error("Backend error: {status} - {}", message.as_deref().unwrap_or("(no message)"))]
    Backend {
        status: u16,
        message: Option<String>,
    },

    /// The response body does not have the shape the endpoint documents.
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        endpoint: &'static str,
        reason: String,
    },

    /// An authorized call was attempted without a signed-in session.
    #[error("Not signed in")]
    Unauthenticated,

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A local file could not be read.
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Build a [`ApiError::MalformedResponse`].
    pub(crate) fn malformed(endpoint: &'static str, reason: impl ToString) -> Self {
        Self::MalformedResponse {
            endpoint,
            reason: reason.to_string(),
        }
    }

    /// Message to show the user: the backend's own message when it sent one,
    /// otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Backend {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Unauthenticated => "Please sign in to continue.".to_string(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status reported by the backend, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_preferred() {
        let err = ApiError::Backend {
            status: 400,
            message: Some("Title already used".to_string()),
        };
        assert_eq!(err.user_message("Failed to save podcast"), "Title already used");
    }

    #[test]
    fn test_fallback_when_backend_silent() {
        let err = ApiError::Backend {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Failed to save podcast"), "Failed to save podcast");

        let blank = ApiError::Backend {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(blank.user_message("fallback"), "fallback");
    }

    #[test]
    fn test_malformed_is_generic_for_users() {
        let err = ApiError::malformed("GET /api/products", "expected array");
        assert_eq!(err.user_message("Failed to load products"), "Failed to load products");
        assert_eq!(
            err.to_string(),
            "Malformed response from GET /api/products: expected array"
        );
    }

    #[test]
    fn test_display() {
        let err = ApiError::Backend {
            status: 403,
            message: None,
        };
        assert_eq!(err.to_string(), "Backend error: 403 - (no message)");
        assert_eq!(err.status(), Some(403));
    }
}
