//! Response decoding, one function per endpoint.
//!
//! Each decoder accepts exactly the shapes its endpoint documents and fails
//! with [`ApiError::MalformedResponse`] on anything else rather than
//! defaulting to an empty list.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use stitchhouse_core::{CatalogItem, Podcast, VideoKind};

use crate::error::ApiError;
use crate::session::AuthUser;

pub(crate) const PRODUCTS: &str = "GET /api/products";
pub(crate) const PODCASTS: &str = "GET /api/podcasts";
pub(crate) const LOGO_DESIGNS: &str = "GET /api/custom-logo-designs";
pub(crate) const AUTH_ME: &str = "GET /api/auth/me";

/// Pull a human-readable message out of an error body.
///
/// Looks for `message`, then `error` (string or `{message}`), then the first
/// entry of `errors`.
#[must_use]
pub fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    message_of(&value)
}

fn message_of(value: &Value) -> Option<String> {
    let candidate = value
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| value.get("error").and_then(Value::as_str))
        .or_else(|| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
        })
        .or_else(|| {
            value
                .get("errors")
                .and_then(Value::as_array)
                .and_then(|errors| errors.first())
                .and_then(|first| first.get("msg").or_else(|| first.get("message")).or(Some(first)))
                .and_then(Value::as_str)
        })?;
    let trimmed = candidate.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Fail with [`ApiError::Backend`] when a 2xx body says `success: false`.
pub(crate) fn ensure_success(value: &Value) -> Result<(), ApiError> {
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Backend {
            status: 200,
            message: message_of(value),
        });
    }
    Ok(())
}

fn from_value<T: DeserializeOwned>(endpoint: &'static str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::malformed(endpoint, e))
}

/// `GET /api/products`: `{products: [...]}` or a bare array.
///
/// # Errors
///
/// Returns `MalformedResponse` for any other shape.
pub fn products(value: Value) -> Result<Vec<CatalogItem>, ApiError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Body {
        Wrapped { products: Vec<CatalogItem> },
        Bare(Vec<CatalogItem>),
    }

    ensure_success(&value)?;
    match from_value::<Body>(PRODUCTS, value)? {
        Body::Wrapped { products } | Body::Bare(products) => Ok(products),
    }
}

/// `GET /api/podcasts`: `{success, podcasts: [...]}`.
///
/// # Errors
///
/// Returns `Backend` on `success: false` and `MalformedResponse` when the
/// list is missing or an external-link episode has no URL.
pub fn podcasts(value: Value) -> Result<Vec<Podcast>, ApiError> {
    #[derive(Deserialize)]
    struct Body {
        podcasts: Vec<Podcast>,
    }

    ensure_success(&value)?;
    let body: Body = from_value(PODCASTS, value)?;
    if let Some(bad) = body
        .podcasts
        .iter()
        .find(|p| p.kind == VideoKind::Url && p.video_url.trim().is_empty())
    {
        return Err(ApiError::malformed(
            PODCASTS,
            format!("podcast {} has videoType \"url\" but no videoUrl", bad.id),
        ));
    }
    Ok(body.podcasts)
}

/// `GET /api/custom-logo-designs`: `{data: [...]}`.
///
/// # Errors
///
/// Returns `MalformedResponse` when `data` is missing or not a list of designs.
pub fn logo_designs(value: Value) -> Result<Vec<CatalogItem>, ApiError> {
    #[derive(Deserialize)]
    struct Body {
        data: Vec<CatalogItem>,
    }

    ensure_success(&value)?;
    Ok(from_value::<Body>(LOGO_DESIGNS, value)?.data)
}

/// `GET /api/auth/me`: `{user: {...}}`.
///
/// # Errors
///
/// Returns `MalformedResponse` when `user` is missing.
pub fn auth_user(value: Value) -> Result<AuthUser, ApiError> {
    #[derive(Deserialize)]
    struct Body {
        user: AuthUser,
    }

    ensure_success(&value)?;
    Ok(from_value::<Body>(AUTH_ME, value)?.user)
}

/// Acknowledgement bodies (`{success, message}`) of submit/delete calls.
///
/// Returns the backend's message, if it sent one.
///
/// # Errors
///
/// Returns `Backend` on `success: false`.
pub fn acknowledgement(value: &Value) -> Result<Option<String>, ApiError> {
    ensure_success(value)?;
    Ok(message_of(value))
}
