//! Customer submissions: contact messages and embroidery requests.

use std::path::PathBuf;

use stitchhouse_api::LocalFile;
use stitchhouse_core::{Budget, EmbroideryType, PackageTier, Placement};
use stitchhouse_storefront::{
    ContactDraft, ContactForm, EmbroideryDraft, EmbroideryForm, FormError,
};

use super::{App, CliError};

pub async fn contact(app: &mut App, draft: ContactDraft) -> Result<(), CliError> {
    let mut form = ContactForm { draft };
    let result = form.submit(&app.api, &mut app.notices).await;
    app.flush_notices();
    result?;
    Ok(())
}

pub struct EmbroideryArgs {
    pub business_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
    pub embroidery_type: EmbroideryType,
    pub placement: Placement,
    pub quantity: u32,
    pub budget: Option<Budget>,
    pub timeline: Option<String>,
    pub description: String,
    pub package: PackageTier,
    pub images: Vec<PathBuf>,
    /// Descriptions matched to `images` by position.
    pub notes: Vec<String>,
}

pub async fn embroidery(app: &mut App, args: EmbroideryArgs) -> Result<(), CliError> {
    if args.notes.len() > args.images.len() {
        return Err(CliError::Usage(
            "More --image-note values than --image files".to_string(),
        ));
    }
    let mut form = EmbroideryForm::new();
    form.draft = EmbroideryDraft {
        business_name: args.business_name,
        contact_name: args.contact_name,
        email: args.email,
        phone: args.phone,
        website: args.website.unwrap_or_default(),
        embroidery_type: Some(args.embroidery_type),
        placement: Some(args.placement),
        quantity: args.quantity,
        budget: args.budget,
        timeline: args.timeline.unwrap_or_default(),
        description: args.description,
    };
    form.select_package(args.package);

    // Field checks come before the token exchange so a bad draft makes no request.
    if let Err(e) = form.validate() {
        app.notices.error(e.to_string());
        app.flush_notices();
        return Err(FormError::from(e).into());
    }
    app.ensure_session().await?;

    let mut files = Vec::with_capacity(args.images.len());
    for path in &args.images {
        files.push(LocalFile::from_path(path).await?);
    }
    let outcome = form.add_images(files, &mut app.notices);
    if !outcome.rejected.is_empty() {
        app.flush_notices();
        return Err(CliError::Usage("Some images were rejected".to_string()));
    }
    for (id, note) in outcome.accepted.into_iter().zip(args.notes) {
        form.describe_image(id, note);
    }

    let result = form.submit(&app.api, &app.session, &mut app.notices).await;
    app.flush_notices();
    result?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::testing::unreachable_app;

    fn args() -> EmbroideryArgs {
        EmbroideryArgs {
            business_name: "Hill Cafe".to_string(),
            contact_name: "Sam".to_string(),
            email: "sam@hill.cafe".to_string(),
            phone: "555-0100".to_string(),
            website: None,
            embroidery_type: EmbroideryType::Logo,
            placement: Placement::LeftChest,
            quantity: 24,
            budget: None,
            timeline: None,
            description: "Aprons".to_string(),
            package: PackageTier::Basic,
            images: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_invalid_embroidery_draft_skips_token_exchange() {
        let mut app = unreachable_app("embroidery-invalid", Some("tok_env")).await;
        let invalid = EmbroideryArgs {
            business_name: "  ".to_string(),
            ..args()
        };

        let err = embroidery(&mut app, invalid).await.unwrap_err();
        assert!(matches!(err, CliError::Form(FormError::Invalid(ref e)) if e.field == "businessName"));
        assert!(app.session.current().is_none());
    }

    #[tokio::test]
    async fn test_valid_embroidery_draft_needs_a_session() {
        let mut app = unreachable_app("embroidery-signed-out", None).await;

        let err = embroidery(&mut app, args()).await.unwrap_err();
        assert!(matches!(err, CliError::NotSignedIn));
    }
}
