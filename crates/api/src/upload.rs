//! Upload manager: local files staged for a submission.
//!
//! Files are checked against an [`UploadPolicy`] when added. A batch that
//! would push the list past the policy's file cap is rejected as a whole;
//! otherwise each file is accepted or rejected on its own (wrong type, too
//! large) so one bad file does not block the rest.
//!
//! Image files get a `data:` URL preview. Previews are [`Preview`] handles
//! registered with a [`PreviewPool`]; a preview is released when its entry is
//! removed, when the manager is cleared, or when the manager is dropped, so
//! repeated open/close cycles of a form never accumulate preview data.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

use crate::error::ApiError;
use crate::notify::Notices;

/// Ten megabytes, the per-file cap for reference images.
pub const TEN_MB: u64 = 10 * 1024 * 1024;

/// Count, size and type limits for one upload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_files: usize,
    pub max_file_bytes: u64,
    pub accepted_prefix: &'static str,
}

impl UploadPolicy {
    /// Reference images attached to an embroidery request.
    pub const EMBROIDERY_REFERENCES: Self = Self {
        max_files: 5,
        max_file_bytes: TEN_MB,
        accepted_prefix: "image/",
    };

    /// Reference images attached to a logo design brief.
    pub const LOGO_REFERENCES: Self = Self {
        max_files: 3,
        max_file_bytes: TEN_MB,
        accepted_prefix: "image/",
    };

    /// Podcast episode video file.
    pub const PODCAST_VIDEO: Self = Self {
        max_files: 1,
        max_file_bytes: 500 * 1024 * 1024,
        accepted_prefix: "video/",
    };

    /// Podcast episode thumbnail.
    pub const PODCAST_THUMBNAIL: Self = Self {
        max_files: 1,
        max_file_bytes: TEN_MB,
        accepted_prefix: "image/",
    };

    fn accepts_type(&self, mime_type: &str) -> bool {
        mime_type
            .to_ascii_lowercase()
            .starts_with(self.accepted_prefix)
    }

    fn max_megabytes(&self) -> u64 {
        self.max_file_bytes / (1024 * 1024)
    }
}

/// A file picked by the user, held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for LocalFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl LocalFile {
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, deriving its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        let mime_type = mime_from_extension(path).to_string();
        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.to_ascii_lowercase().starts_with("image/")
    }
}

/// MIME type for the file kinds the storefront accepts.
fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

// =============================================================================
// Previews
// =============================================================================

/// Tracks how many previews are alive.
#[derive(Debug, Clone, Default)]
pub struct PreviewPool {
    live: Arc<AtomicUsize>,
}

impl PreviewPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of previews not yet released.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    fn create(&self, file: &LocalFile) -> Preview {
        self.live.fetch_add(1, Ordering::SeqCst);
        Preview {
            data_url: format!("data:{};base64,{}", file.mime_type, STANDARD.encode(&file.bytes)),
            live: Arc::clone(&self.live),
        }
    }
}

/// Display data for an image awaiting upload. Released on drop.
#[derive(Debug)]
pub struct Preview {
    data_url: String,
    live: Arc<AtomicUsize>,
}

impl Preview {
    /// `data:<mime>;base64,<payload>` URL suitable for an `<img src>`.
    #[must_use]
    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Upload manager
// =============================================================================

/// A staged file.
#[derive(Debug)]
pub struct UploadEntry {
    pub id: Uuid,
    pub file: LocalFile,
    pub preview: Option<Preview>,
}

/// Why a file was turned away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The batch would exceed the file cap; nothing was added.
    TooManyFiles { max: usize },
    /// MIME type outside the accepted prefix.
    WrongType { name: String },
    /// File larger than the per-file cap.
    TooLarge { name: String },
}

/// Result of [`UploadManager::add_files`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AddOutcome {
    pub accepted: Vec<Uuid>,
    pub rejected: Vec<Rejection>,
}

/// Ordered list of staged files for one upload field.
#[derive(Debug)]
pub struct UploadManager {
    policy: UploadPolicy,
    entries: Vec<UploadEntry>,
    previews: PreviewPool,
}

impl UploadManager {
    #[must_use]
    pub fn new(policy: UploadPolicy) -> Self {
        Self::with_pool(policy, PreviewPool::new())
    }

    /// Create a manager whose previews are counted in `previews`.
    #[must_use]
    pub const fn with_pool(policy: UploadPolicy, previews: PreviewPool) -> Self {
        Self {
            policy,
            entries: Vec::new(),
            previews,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Stage a batch of files.
    ///
    /// Every rejection also pushes an error notice.
    pub fn add_files(&mut self, files: Vec<LocalFile>, notices: &mut Notices) -> AddOutcome {
        let mut outcome = AddOutcome::default();

        if self.entries.len() + files.len() > self.policy.max_files {
            tracing::debug!(
                existing = self.entries.len(),
                incoming = files.len(),
                max = self.policy.max_files,
                "upload batch rejected"
            );
            notices.error(format!(
                "You can upload at most {} files",
                self.policy.max_files
            ));
            outcome.rejected.push(Rejection::TooManyFiles {
                max: self.policy.max_files,
            });
            return outcome;
        }

        for file in files {
            if !self.policy.accepts_type(&file.mime_type) {
                notices.error(format!("{} is not a supported file type", file.name));
                outcome.rejected.push(Rejection::WrongType { name: file.name });
                continue;
            }
            if file.size() > self.policy.max_file_bytes {
                notices.error(format!(
                    "{} is larger than {}MB",
                    file.name,
                    self.policy.max_megabytes()
                ));
                outcome.rejected.push(Rejection::TooLarge { name: file.name });
                continue;
            }

            let id = Uuid::new_v4();
            let preview = file.is_image().then(|| self.previews.create(&file));
            self.entries.push(UploadEntry { id, file, preview });
            outcome.accepted.push(id);
        }

        outcome
    }

    /// Remove a staged file, releasing its preview.
    ///
    /// Returns the removed file, if the id was known.
    pub fn remove_file(&mut self, id: Uuid) -> Option<LocalFile> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        let entry = self.entries.remove(index);
        Some(entry.file)
    }

    /// Drop every staged file and preview.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Staged files in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[UploadEntry] {
        &self.entries
    }

    /// Copies of the staged files, for building a submission.
    #[must_use]
    pub fn files(&self) -> Vec<LocalFile> {
        self.entries.iter().map(|e| e.file.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Room left under the file cap.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.policy.max_files.saturating_sub(self.entries.len())
    }
}
