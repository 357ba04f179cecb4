//! Customer submissions: embroidery requests, logo briefs and contact messages.

use async_trait::async_trait;
use tracing::instrument;

use super::{ApiClient, authorized, multipart};
use crate::backend::RequestBackend;
use crate::decode;
use crate::error::ApiError;
use crate::payload::{ContactMessage, EmbroideryRequest, LogoBrief};
use crate::session::Session;

const EMBROIDERY: &str = "POST /api/custom-embroidery-requests";
const LOGO_BRIEF: &str = "POST /api/custom-logo-requests";
const CONTACT: &str = "POST /api/contact";

#[async_trait]
impl RequestBackend for ApiClient {
    #[instrument(
        skip(self, session, request),
        fields(business = %request.business_name, images = request.images.len())
    )]
    async fn submit_embroidery_request(
        &self,
        session: &Session,
        request: EmbroideryRequest,
    ) -> Result<Option<String>, ApiError> {
        let url = self.endpoint("/api/custom-embroidery-requests")?;
        let form = multipart(request.fields())?;
        let body = self
            .send(EMBROIDERY, authorized(self.post(url), session).multipart(form))
            .await?;
        let message = decode::acknowledgement(&body)?;
        tracing::info!("embroidery request submitted");
        Ok(message)
    }

    #[instrument(
        skip(self, session, brief),
        fields(business = %brief.business_name, references = brief.references.len())
    )]
    async fn submit_logo_brief(
        &self,
        session: Option<&Session>,
        brief: LogoBrief,
    ) -> Result<Option<String>, ApiError> {
        let url = self.endpoint("/api/custom-logo-requests")?;
        let form = multipart(brief.fields())?;
        let mut request = self.post(url).multipart(form);
        if let Some(session) = session {
            request = authorized(request, session);
        }
        let body = self.send(LOGO_BRIEF, request).await?;
        let message = decode::acknowledgement(&body)?;
        tracing::info!("logo brief submitted");
        Ok(message)
    }

    #[instrument(skip(self, message), fields(email = %message.email, subject = %message.subject))]
    async fn send_contact(&self, message: ContactMessage) -> Result<Option<String>, ApiError> {
        let url = self.endpoint("/api/contact")?;
        let body = self.send(CONTACT, self.post(url).json(&message)).await?;
        let reply = decode::acknowledgement(&body)?;
        tracing::info!("contact message sent");
        Ok(reply)
    }
}
