//! Contact form.

use tracing::instrument;

use stitchhouse_api::{ContactMessage, Notices, RequestBackend};

use crate::error::{FormError, ValidationError, email, required};

/// Project types offered in the "what can we help with" picker.
pub const PROJECT_TYPES: &[&str] = &[
    "custom-embroidery",
    "logo-design",
    "graphic-design",
    "screen-printing",
    "other",
];

const THANKS: &str = "Thank you for your message! We'll get back to you soon.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub project_type: String,
}

#[derive(Debug, Default)]
pub struct ContactForm {
    pub draft: ContactDraft,
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft into a request body.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed field.
    pub fn validate(&self) -> Result<ContactMessage, ValidationError> {
        let d = &self.draft;
        let name = required("name", &d.name, "Name is required")?;
        let email = email(&d.email)?;
        let message = required("message", &d.message, "Message is required")?;
        let project_type = d.project_type.trim();
        if !project_type.is_empty() && !PROJECT_TYPES.contains(&project_type) {
            return Err(ValidationError::new(
                "projectType",
                "Please choose a valid project type",
            ));
        }
        Ok(ContactMessage {
            name,
            email,
            phone: d.phone.trim().to_string(),
            subject: d.subject.trim().to_string(),
            message,
            project_type: project_type.to_string(),
        })
    }

    /// Send the message. The draft is cleared on success.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` before any call when validation fails and `Api` when
    /// the backend call fails. Both push an error notice.
    #[instrument(skip_all)]
    pub async fn submit(
        &mut self,
        api: &dyn RequestBackend,
        notices: &mut Notices,
    ) -> Result<String, FormError> {
        let message = match self.validate() {
            Ok(message) => message,
            Err(e) => {
                notices.error(e.to_string());
                return Err(e.into());
            }
        };

        match api.send_contact(message).await {
            Ok(reply) => {
                let reply = reply.unwrap_or_else(|| THANKS.to_string());
                notices.success(reply.clone());
                self.draft = ContactDraft::default();
                Ok(reply)
            }
            Err(e) => {
                tracing::warn!(error = %e, "contact message failed");
                notices.error(e.user_message("Failed to send message. Please try again."));
                Err(e.into())
            }
        }
    }
}
