//! Podcast management endpoints.

use async_trait::async_trait;
use tracing::instrument;

use stitchhouse_core::{Podcast, PodcastId};

use super::{ApiClient, authorized, multipart};
use crate::backend::PodcastBackend;
use crate::decode;
use crate::error::ApiError;
use crate::payload::PodcastPayload;
use crate::session::Session;

const CREATE: &str = "POST /api/podcasts";
const UPDATE: &str = "PUT /api/podcasts/:id";
const DELETE: &str = "DELETE /api/podcasts/:id";

impl ApiClient {
    fn podcast_url(&self, id: &PodcastId) -> Result<url::Url, ApiError> {
        let mut url = self.endpoint("/api/podcasts")?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(id.as_str());
        Ok(url)
    }
}

#[async_trait]
impl PodcastBackend for ApiClient {
    #[instrument(skip(self, session))]
    async fn list_podcasts(&self, session: &Session) -> Result<Vec<Podcast>, ApiError> {
        let url = self.endpoint("/api/podcasts")?;
        let body = self
            .send(decode::PODCASTS, authorized(self.get(url), session))
            .await?;
        let mut podcasts = decode::podcasts(body)?;
        for podcast in &mut podcasts {
            self.assets().resolve_podcast(podcast);
        }
        tracing::debug!(count = podcasts.len(), "podcasts fetched");
        Ok(podcasts)
    }

    #[instrument(skip(self, session, payload), fields(title = %payload.title, kind = %payload.kind))]
    async fn create_podcast(
        &self,
        session: &Session,
        payload: PodcastPayload,
    ) -> Result<(), ApiError> {
        let url = self.endpoint("/api/podcasts")?;
        let form = multipart(payload.fields())?;
        let body = self
            .send(CREATE, authorized(self.post(url), session).multipart(form))
            .await?;
        decode::acknowledgement(&body)?;
        tracing::info!("podcast created");
        Ok(())
    }

    #[instrument(skip(self, session, payload), fields(title = %payload.title, kind = %payload.kind))]
    async fn update_podcast(
        &self,
        session: &Session,
        id: &PodcastId,
        payload: PodcastPayload,
    ) -> Result<(), ApiError> {
        let url = self.podcast_url(id)?;
        let form = multipart(payload.fields())?;
        let body = self
            .send(UPDATE, authorized(self.put(url), session).multipart(form))
            .await?;
        decode::acknowledgement(&body)?;
        tracing::info!("podcast updated");
        Ok(())
    }

    #[instrument(skip(self, session))]
    async fn delete_podcast(&self, session: &Session, id: &PodcastId) -> Result<(), ApiError> {
        let url = self.podcast_url(id)?;
        let body = self.send(DELETE, authorized(self.delete(url), session)).await?;
        decode::acknowledgement(&body)?;
        tracing::info!("podcast deleted");
        Ok(())
    }
}
