//! Outgoing request bodies.
//!
//! Page controllers validate user input and produce one of these; the client
//! turns them into JSON or multipart bodies. Multipart bodies are described
//! as a flat list of [`FormField`]s first so the exact field layout can be
//! inspected without going through `reqwest`.

use serde::Serialize;

use stitchhouse_core::{Budget, Email, EmbroideryType, PackageTier, Placement, VideoKind};

use crate::upload::LocalFile;

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text { name: String, value: String },
    File { name: String, file: LocalFile },
}

impl FormField {
    fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    fn file(name: impl Into<String>, file: LocalFile) -> Self {
        Self::File {
            name: name.into(),
            file,
        }
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }

    /// Text value, for text fields.
    #[must_use]
    pub fn text_value(&self) -> Option<&str> {
        match self {
            Self::Text { value, .. } => Some(value),
            Self::File { .. } => None,
        }
    }
}

/// Create/update body for a podcast episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodcastPayload {
    pub title: String,
    pub description: String,
    pub kind: VideoKind,
    /// Sent for [`VideoKind::Url`].
    pub video_url: Option<String>,
    /// Sent for [`VideoKind::Upload`]; may be absent on update.
    pub video_file: Option<LocalFile>,
    pub thumbnail: Option<LocalFile>,
}

impl PodcastPayload {
    /// Multipart layout: `title`, `description`, `videoType`, then either
    /// `videoUrl` or `videoFile`, then optional `thumbnail`.
    #[must_use]
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::text("title", &self.title),
            FormField::text("description", &self.description),
            FormField::text("videoType", self.kind.as_str()),
        ];
        match self.kind {
            VideoKind::Url => {
                if let Some(url) = &self.video_url {
                    fields.push(FormField::text("videoUrl", url));
                }
            }
            VideoKind::Upload => {
                if let Some(file) = &self.video_file {
                    fields.push(FormField::file("videoFile", file.clone()));
                }
            }
        }
        if let Some(thumbnail) = &self.thumbnail {
            fields.push(FormField::file("thumbnail", thumbnail.clone()));
        }
        fields
    }
}

/// A reference image plus the customer's note about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    pub file: LocalFile,
    pub description: String,
}

/// Body of `POST /api/custom-embroidery-requests`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbroideryRequest {
    pub business_name: String,
    pub contact_name: String,
    pub email: Email,
    pub phone: String,
    pub website: Option<String>,
    pub embroidery_type: EmbroideryType,
    pub placement: Placement,
    pub quantity: u32,
    pub budget: Option<Budget>,
    pub timeline: Option<String>,
    pub description: String,
    pub package: PackageTier,
    pub images: Vec<ReferenceImage>,
}

impl EmbroideryRequest {
    /// Multipart layout. Images are sent as repeated `images` parts; the
    /// description of the i-th image goes in `imageDescription_<i>`.
    #[must_use]
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::text("businessName", &self.business_name),
            FormField::text("contactName", &self.contact_name),
            FormField::text("email", self.email.as_str()),
            FormField::text("phone", &self.phone),
            FormField::text("embroideryType", self.embroidery_type.as_str()),
            FormField::text("placement", self.placement.as_str()),
            FormField::text("quantity", self.quantity.to_string()),
            FormField::text("description", &self.description),
            FormField::text("package", self.package.as_str()),
            FormField::text("packagePrice", self.package.price().amount().to_string()),
        ];
        if let Some(website) = &self.website {
            fields.push(FormField::text("website", website));
        }
        if let Some(budget) = self.budget {
            fields.push(FormField::text("budget", budget.as_str()));
        }
        if let Some(timeline) = &self.timeline {
            fields.push(FormField::text("timeline", timeline));
        }
        for (i, image) in self.images.iter().enumerate() {
            fields.push(FormField::file("images", image.file.clone()));
            fields.push(FormField::text(
                format!("imageDescription_{i}"),
                &image.description,
            ));
        }
        fields
    }
}

/// Body of `POST /api/custom-logo-requests`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoBrief {
    pub business_name: String,
    pub email: Email,
    pub industry: Option<String>,
    pub style: Option<String>,
    pub notes: String,
    pub package: PackageTier,
    pub references: Vec<LocalFile>,
}

impl LogoBrief {
    #[must_use]
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::text("businessName", &self.business_name),
            FormField::text("email", self.email.as_str()),
            FormField::text("notes", &self.notes),
            FormField::text("package", self.package.as_str()),
        ];
        if let Some(industry) = &self.industry {
            fields.push(FormField::text("industry", industry));
        }
        if let Some(style) = &self.style {
            fields.push(FormField::text("style", style));
        }
        for file in &self.references {
            fields.push(FormField::file("references", file.clone()));
        }
        fields
    }
}

/// JSON body of `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub project_type: String,
}
