//! Backend seams used by the page controllers.
//!
//! [`crate::ApiClient`] implements every trait against the REST API. The
//! controllers only depend on these traits, which keeps them testable with
//! in-memory fakes.

use async_trait::async_trait;

use stitchhouse_core::{CatalogItem, Podcast, PodcastId};

use crate::error::ApiError;
use crate::filters::LogoDesignFilters;
use crate::payload::{ContactMessage, EmbroideryRequest, LogoBrief, PodcastPayload};
use crate::session::Session;

/// Read-only catalog listings.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// `GET /api/products?limit=N`.
    async fn products(&self, limit: u32) -> Result<Vec<CatalogItem>, ApiError>;

    /// `GET /api/custom-logo-designs?<filters>`.
    async fn logo_designs(&self, filters: &LogoDesignFilters)
    -> Result<Vec<CatalogItem>, ApiError>;
}

/// Admin CRUD on podcast episodes.
#[async_trait]
pub trait PodcastBackend: Send + Sync {
    async fn list_podcasts(&self, session: &Session) -> Result<Vec<Podcast>, ApiError>;

    async fn create_podcast(
        &self,
        session: &Session,
        payload: PodcastPayload,
    ) -> Result<(), ApiError>;

    async fn update_podcast(
        &self,
        session: &Session,
        id: &PodcastId,
        payload: PodcastPayload,
    ) -> Result<(), ApiError>;

    async fn delete_podcast(&self, session: &Session, id: &PodcastId) -> Result<(), ApiError>;
}

/// Customer submissions. Each returns the backend's acknowledgement message.
#[async_trait]
pub trait RequestBackend: Send + Sync {
    async fn submit_embroidery_request(
        &self,
        session: &Session,
        request: EmbroideryRequest,
    ) -> Result<Option<String>, ApiError>;

    async fn submit_logo_brief(
        &self,
        session: Option<&Session>,
        brief: LogoBrief,
    ) -> Result<Option<String>, ApiError>;

    async fn send_contact(&self, message: ContactMessage) -> Result<Option<String>, ApiError>;
}
