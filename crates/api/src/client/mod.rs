//! REST client for the Stitchhouse backend.
//!
//! # Architecture
//!
//! - One `reqwest::Client` shared behind an `Arc`; cloning is cheap
//! - Every response is read as text first, then decoded by the endpoint's
//!   decoder in [`crate::decode`], so failures can be logged with the body
//! - Backend-hosted asset paths are rewritten to absolute URLs before records
//!   are handed out
//!
//! Endpoint methods live in the submodules as implementations of the traits
//! in [`crate::backend`].

mod auth;
mod catalog;
mod podcasts;
mod requests;

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use url::Url;

use crate::assets::AssetUrls;
use crate::config::ClientConfig;
use crate::decode::backend_message;
use crate::error::ApiError;
use crate::payload::FormField;
use crate::session::Session;

const USER_AGENT: &str = concat!("stitchhouse/", env!("CARGO_PKG_VERSION"));

/// Client for the Stitchhouse REST API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    origin: Url,
    assets: AssetUrls,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                origin: config.api_origin.clone(),
                assets: AssetUrls::new(&config.api_origin, &config.upload_prefix),
            }),
        })
    }

    /// Asset URL rewriter bound to this client's origin.
    #[must_use]
    pub fn assets(&self) -> &AssetUrls {
        &self.inner.assets
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.origin.join(path)?)
    }

    fn get(&self, url: Url) -> RequestBuilder {
        self.inner.http.get(url)
    }

    fn post(&self, url: Url) -> RequestBuilder {
        self.inner.http.post(url)
    }

    fn put(&self, url: Url) -> RequestBuilder {
        self.inner.http.put(url)
    }

    fn delete(&self, url: Url) -> RequestBuilder {
        self.inner.http.delete(url)
    }

    /// Send a request and return its JSON body.
    ///
    /// Non-2xx responses become [`ApiError::Backend`] carrying whatever
    /// message the body held. An empty 2xx body decodes as `null`.
    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<Value, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                tracing::warn!(endpoint, "backend rejected credentials");
            } else {
                tracing::error!(
                    status = %status,
                    endpoint,
                    body = %body.chars().take(500).collect::<String>(),
                    "backend returned non-success status"
                );
            }
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message: backend_message(&body),
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                endpoint,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse backend response"
            );
            ApiError::malformed(endpoint, e)
        })
    }
}

/// Attach the session's bearer token.
fn authorized(request: RequestBuilder, session: &Session) -> RequestBuilder {
    request.header(reqwest::header::AUTHORIZATION, session.bearer())
}

/// Build a multipart body from a field list.
fn multipart(fields: Vec<FormField>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File { name, file } => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.name)
                    .mime_str(&file.mime_type)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
