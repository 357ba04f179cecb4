//! Custom embroidery request form.
//!
//! Requires a signed-in customer. Reference images (up to five) each carry a
//! free-text description that is sent alongside the file.

use std::collections::HashMap;

use tracing::instrument;
use uuid::Uuid;

use stitchhouse_api::{
    AddOutcome, EmbroideryRequest, LocalFile, Notices, ReferenceImage, RequestBackend,
    SessionContext, UploadManager, UploadPolicy,
};
use stitchhouse_core::{Budget, CartLine, EmbroideryType, PackageTier, Placement};

use crate::cart::Cart;
use crate::error::{FormError, ValidationError, email, optional, required};

/// Cart category tag for embroidery packages.
pub const CART_CATEGORY: &str = "embroidery";

/// Editable fields of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbroideryDraft {
    pub business_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub embroidery_type: Option<EmbroideryType>,
    pub placement: Option<Placement>,
    pub quantity: u32,
    pub budget: Option<Budget>,
    pub timeline: String,
    pub description: String,
}

impl Default for EmbroideryDraft {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            contact_name: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            embroidery_type: None,
            placement: None,
            quantity: 1,
            budget: None,
            timeline: String::new(),
            description: String::new(),
        }
    }
}

pub struct EmbroideryForm {
    pub draft: EmbroideryDraft,
    package: PackageTier,
    images: UploadManager,
    descriptions: HashMap<Uuid, String>,
}

impl Default for EmbroideryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbroideryForm {
    #[must_use]
    pub fn new() -> Self {
        Self::with_uploads(UploadManager::new(UploadPolicy::EMBROIDERY_REFERENCES))
    }

    #[must_use]
    pub fn with_uploads(images: UploadManager) -> Self {
        Self {
            draft: EmbroideryDraft::default(),
            package: PackageTier::default(),
            images,
            descriptions: HashMap::new(),
        }
    }

    pub fn select_package(&mut self, tier: PackageTier) {
        self.package = tier;
    }

    #[must_use]
    pub const fn package(&self) -> PackageTier {
        self.package
    }

    /// Add the selected package to `cart`.
    pub fn add_package_to_cart(&self, cart: &mut dyn Cart, notices: &mut Notices) {
        let line = CartLine::from_package(self.package, CART_CATEGORY);
        notices.success(format!("{} added to cart", line.name));
        cart.add_line(line);
    }

    pub fn add_images(&mut self, files: Vec<LocalFile>, notices: &mut Notices) -> AddOutcome {
        self.images.add_files(files, notices)
    }

    /// Remove an image and its description.
    pub fn remove_image(&mut self, id: Uuid) -> bool {
        self.descriptions.remove(&id);
        self.images.remove_file(id).is_some()
    }

    /// Set the description of a staged image. Returns `false` for an unknown id.
    pub fn describe_image(&mut self, id: Uuid, description: impl Into<String>) -> bool {
        if !self.images.entries().iter().any(|e| e.id == id) {
            return false;
        }
        self.descriptions.insert(id, description.into());
        true
    }

    #[must_use]
    pub const fn images(&self) -> &UploadManager {
        &self.images
    }

    /// Discard the draft, the staged images and their previews.
    pub fn reset(&mut self) {
        self.draft = EmbroideryDraft::default();
        self.package = PackageTier::default();
        self.images.clear();
        self.descriptions.clear();
    }

    /// Validate the draft into a request body.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed field.
    pub fn validate(&self) -> Result<EmbroideryRequest, ValidationError> {
        let d = &self.draft;
        let business_name =
            required("businessName", &d.business_name, "Business name is required")?;
        let contact_name =
            required("contactName", &d.contact_name, "Contact name is required")?;
        let email = email(&d.email)?;
        let phone = required("phone", &d.phone, "Phone number is required")?;
        let embroidery_type = d.embroidery_type.ok_or_else(|| {
            ValidationError::new("embroideryType", "Please select an embroidery type")
        })?;
        let placement = d
            .placement
            .ok_or_else(|| ValidationError::new("placement", "Please select a placement"))?;
        if d.quantity == 0 {
            return Err(ValidationError::new("quantity", "Quantity must be at least 1"));
        }
        let description =
            required("description", &d.description, "Please describe your project")?;

        let images = self
            .images
            .entries()
            .iter()
            .map(|entry| ReferenceImage {
                file: entry.file.clone(),
                description: self
                    .descriptions
                    .get(&entry.id)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default(),
            })
            .collect();

        Ok(EmbroideryRequest {
            business_name,
            contact_name,
            email,
            phone,
            website: optional(&d.website),
            embroidery_type,
            placement,
            quantity: d.quantity,
            budget: d.budget,
            timeline: optional(&d.timeline),
            description,
            package: self.package,
            images,
        })
    }

    /// Submit the request. On success the form is reset.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` when validation fails and `Api` when nobody is signed
    /// in or the backend call fails. Every failure also pushes a notice and
    /// leaves the draft untouched.
    #[instrument(skip_all, fields(images = self.images.len(), package = %self.package.as_str()))]
    pub async fn submit(
        &mut self,
        api: &dyn RequestBackend,
        session: &SessionContext,
        notices: &mut Notices,
    ) -> Result<Option<String>, FormError> {
        let request = match self.validate() {
            Ok(request) => request,
            Err(e) => {
                notices.error(e.to_string());
                return Err(e.into());
            }
        };

        let session = match session.require() {
            Ok(session) => session,
            Err(e) => {
                notices.error("Please sign in to submit a request");
                return Err(e.into());
            }
        };

        match api.submit_embroidery_request(session, request).await {
            Ok(message) => {
                notices.success(
                    message
                        .clone()
                        .unwrap_or_else(|| "Your embroidery request has been submitted".to_string()),
                );
                self.reset();
                Ok(message)
            }
            Err(e) => {
                tracing::warn!(error = %e, "embroidery request failed");
                notices.error(e.user_message("Failed to submit request"));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use stitchhouse_api::{ApiError, NoticeLevel, PreviewPool};
    use stitchhouse_core::Role;

    use super::*;
    use crate::testing::{Call, FakeBackend, png, session};

    fn filled() -> EmbroideryForm {
        let mut form = EmbroideryForm::new();
        form.draft = EmbroideryDraft {
            business_name: "Hill Cafe".to_string(),
            contact_name: "Sam".to_string(),
            email: "sam@hill.cafe".to_string(),
            phone: "555-0100".to_string(),
            embroidery_type: Some(EmbroideryType::Logo),
            placement: Some(Placement::LeftChest),
            quantity: 24,
            description: "Aprons for staff".to_string(),
            ..EmbroideryDraft::default()
        };
        form
    }

    fn signed_in() -> SessionContext {
        let mut ctx = SessionContext::new();
        ctx.sign_in(session(Role::User));
        ctx
    }

    #[test]
    fn test_validation_order() {
        let mut form = filled();
        form.draft.phone = "  ".to_string();
        form.draft.placement = None;
        assert_eq!(form.validate().unwrap_err().message, "Phone number is required");

        form.draft.phone = "555".to_string();
        assert_eq!(form.validate().unwrap_err().field, "placement");

        form.draft.placement = Some(Placement::Sleeve);
        form.draft.quantity = 0;
        assert_eq!(form.validate().unwrap_err().message, "Quantity must be at least 1");
    }

    #[test]
    fn test_images_carry_descriptions_in_order() {
        let mut notices = Notices::new();
        let mut form = filled();
        let outcome = form.add_images(vec![png("front.png", 2), png("back.png", 2)], &mut notices);
        assert!(form.describe_image(outcome.accepted[1], " back panel "));
        assert!(!form.describe_image(Uuid::new_v4(), "nope"));

        let request = form.validate().unwrap();
        assert_eq!(request.images[0].file.name, "front.png");
        assert_eq!(request.images[0].description, "");
        assert_eq!(request.images[1].description, "back panel");
    }

    #[test]
    fn test_sixth_image_rejects_batch() {
        let mut notices = Notices::new();
        let mut form = filled();
        let five: Vec<_> = (0..5).map(|i| png(&format!("{i}.png"), 1)).collect();
        assert_eq!(form.add_images(five, &mut notices).accepted.len(), 5);

        let outcome = form.add_images(vec![png("6.png", 1)], &mut notices);
        assert!(outcome.accepted.is_empty());
        assert_eq!(form.images().len(), 5);
    }

    #[tokio::test]
    async fn test_submit_requires_session() {
        let api = FakeBackend::default();
        let mut notices = Notices::new();
        let mut form = filled();

        let err = form.submit(&api, &SessionContext::new(), &mut notices).await.unwrap_err();
        assert!(matches!(err, FormError::Api(ApiError::Unauthenticated)));
        assert!(api.calls().is_empty());
        assert_eq!(form.draft.business_name, "Hill Cafe");
    }

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        let api = FakeBackend::default();
        let mut notices = Notices::new();
        let mut form = filled();
        form.draft.email = "not-an-email".to_string();

        assert!(form.submit(&api, &signed_in(), &mut notices).await.is_err());
        assert!(api.calls().is_empty());
        assert_eq!(notices.last().unwrap().message, "Please enter a valid email address");
    }

    #[tokio::test]
    async fn test_success_resets_and_releases_previews() {
        let pool = PreviewPool::new();
        let api = FakeBackend {
            reply: Some("We'll be in touch within 24 hours".to_string()),
            ..FakeBackend::default()
        };
        let mut notices = Notices::new();
        let mut form = EmbroideryForm::with_uploads(UploadManager::with_pool(
            UploadPolicy::EMBROIDERY_REFERENCES,
            pool.clone(),
        ));
        form.draft = filled().draft;
        form.select_package(PackageTier::Premium);
        let _ = form.add_images(vec![png("a.png", 3), png("b.png", 3)], &mut notices);
        assert_eq!(pool.live(), 2);

        let reply = form.submit(&api, &signed_in(), &mut notices).await.unwrap();
        assert_eq!(reply.as_deref(), Some("We'll be in touch within 24 hours"));

        let Call::Embroidery(sent) = &api.calls()[0] else {
            panic!("expected an embroidery request");
        };
        assert_eq!(sent.package, PackageTier::Premium);
        assert_eq!(sent.images.len(), 2);

        assert_eq!(pool.live(), 0);
        assert_eq!(form.draft, EmbroideryDraft::default());
        assert_eq!(form.package(), PackageTier::Basic);
        assert_eq!(notices.count(NoticeLevel::Success), 1);
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_draft_and_images() {
        let api = FakeBackend::failing(500, None);
        let mut notices = Notices::new();
        let mut form = filled();
        let _ = form.add_images(vec![png("a.png", 3)], &mut notices);

        assert!(form.submit(&api, &signed_in(), &mut notices).await.is_err());
        assert_eq!(form.images().len(), 1);
        assert_eq!(notices.last().unwrap().message, "Failed to submit request");
    }
}
