//! Integration tests for Stitchhouse.
//!
//! The tests under `tests/` drive the real [`ApiClient`] (and the page
//! controllers on top of it) against [`FakeBackend`], an `axum` server bound
//! to an ephemeral local port. The fake answers with canned responses and
//! records every request it receives, multipart parts included.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stitchhouse-integration-tests
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use stitchhouse_api::{ApiClient, ApiError, ClientConfig};

/// One part of a recorded multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl Part {
    /// Body as text, for text fields.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

/// Recorded request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedBody {
    Empty,
    Json(Value),
    Multipart(Vec<Part>),
    Other(Vec<u8>),
}

/// A request as seen by the fake.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: RecordedBody,
}

impl Recorded {
    /// `"METHOD /path"`.
    #[must_use]
    pub fn route(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Multipart parts, or an empty slice for other bodies.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        match &self.body {
            RecordedBody::Multipart(parts) => parts,
            _ => &[],
        }
    }

    /// First part called `name`.
    #[must_use]
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts().iter().find(|p| p.name == name)
    }

    /// Text of the first part called `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<String> {
        self.part(name).map(Part::text)
    }

    /// Part names in order.
    #[must_use]
    pub fn part_names(&self) -> Vec<&str> {
        self.parts().iter().map(|p| p.name.as_str()).collect()
    }

    #[must_use]
    pub const fn json(&self) -> Option<&Value> {
        match &self.body {
            RecordedBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: String,
}

#[derive(Default)]
struct Inner {
    stubs: HashMap<String, Stub>,
    requests: Vec<Recorded>,
}

type Shared = Arc<Mutex<Inner>>;

fn lock(shared: &Shared) -> MutexGuard<'_, Inner> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process stand-in for the Stitchhouse backend.
pub struct FakeBackend {
    origin: Url,
    shared: Shared,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Errors
    ///
    /// Returns error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let shared = Shared::default();
        let app = Router::new().fallback(handle).with_state(Arc::clone(&shared));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let origin = Url::parse(&format!("http://{addr}"))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        Ok(Self {
            origin,
            shared,
            server,
        })
    }

    #[must_use]
    pub const fn origin(&self) -> &Url {
        &self.origin
    }

    /// Answer `METHOD path` with `status` and a JSON body.
    pub fn stub(&self, method: &str, path: &str, status: u16, body: &Value) {
        self.stub_raw(method, path, status, &body.to_string());
    }

    /// Answer `METHOD path` with `status` and a verbatim body.
    pub fn stub_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        let stub = Stub {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: body.to_string(),
        };
        lock(&self.shared)
            .stubs
            .insert(format!("{method} {path}"), stub);
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<Recorded> {
        lock(&self.shared).requests.clone()
    }

    /// Requests received for `METHOD path`.
    #[must_use]
    pub fn requests_to(&self, route: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.route() == route)
            .collect()
    }

    /// Client configuration pointing at this fake.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.origin.clone())
    }

    /// A real client pointing at this fake.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn client(&self) -> Result<ApiClient, ApiError> {
        ApiClient::new(&self.config())
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(State(shared): State<Shared>, request: Request) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);
    let authorization = header_value(request.headers(), header::AUTHORIZATION);
    let content_type = header_value(request.headers(), header::CONTENT_TYPE).unwrap_or_default();

    let body = if content_type.starts_with("multipart/form-data") {
        match Multipart::from_request(request, &()).await {
            Ok(multipart) => RecordedBody::Multipart(read_parts(multipart).await),
            Err(rejection) => return rejection.into_response(),
        }
    } else {
        let bytes = to_bytes(request.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        if bytes.is_empty() {
            RecordedBody::Empty
        } else if content_type.starts_with("application/json") {
            serde_json::from_slice(&bytes).map_or_else(
                |_| RecordedBody::Other(bytes.to_vec()),
                RecordedBody::Json,
            )
        } else {
            RecordedBody::Other(bytes.to_vec())
        }
    };

    let route = format!("{method} {path}");
    let stub = {
        let mut inner = lock(&shared);
        inner.requests.push(Recorded {
            method,
            path,
            query,
            authorization,
            body,
        });
        inner.stubs.get(&route).cloned()
    };

    match stub {
        Some(stub) => Response::builder()
            .status(stub.status)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(stub.body))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(serde_json::json!({"message": format!("No stub for {route}")})),
        )
            .into_response(),
    }
}

async fn read_parts(mut multipart: Multipart) -> Vec<Part> {
    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        parts.push(Part {
            name,
            file_name,
            content_type,
            data,
        });
    }
    parts
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
