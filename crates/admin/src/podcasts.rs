//! Podcast management panel.
//!
//! # States
//!
//! ```text
//! Idle ──open_create/open_edit──▶ FormOpen ──submit──▶ Submitting ──ok──▶ Idle (list re-fetched)
//!   │                               ▲                      │
//!   │                               └────────failure───────┘ (draft kept)
//!   └──request_delete──▶ ConfirmDelete ──confirm_delete──▶ Idle (row removed locally)
//!                               └──cancel_delete──▶ Idle
//! ```
//!
//! A panel built for a non-admin starts and stays in `AccessDenied`.
//!
//! Staged files belong to the draft. Closing the form, a successful save and
//! replacing the draft all drop it, which releases its previews.

use tracing::instrument;

use stitchhouse_api::{
    Applied, CollectionCache, LocalFile, Notices, PodcastBackend, PodcastPayload, PreviewPool,
    Session, SessionContext, UploadManager, UploadPolicy,
};
use stitchhouse_core::{Podcast, PodcastId, VideoKind};

use crate::error::{ACCESS_DENIED, PanelError};

const TITLE_REQUIRED: &str = "Title is required";
const VIDEO_URL_REQUIRED: &str = "Video URL is required";
const VIDEO_FILE_REQUIRED: &str = "Video file is required";

/// Whether the form creates a new episode or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(PodcastId),
}

/// Editable copy of an episode.
#[derive(Debug)]
pub struct PodcastDraft {
    pub title: String,
    pub description: String,
    pub kind: VideoKind,
    pub video_url: String,
    /// Thumbnail currently stored on the backend, when editing.
    pub existing_thumbnail: Option<String>,
    video: UploadManager,
    thumbnail: UploadManager,
    previews: PreviewPool,
}

impl PodcastDraft {
    fn empty(previews: &PreviewPool) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            kind: VideoKind::default(),
            video_url: String::new(),
            existing_thumbnail: None,
            video: UploadManager::with_pool(UploadPolicy::PODCAST_VIDEO, previews.clone()),
            thumbnail: UploadManager::with_pool(UploadPolicy::PODCAST_THUMBNAIL, previews.clone()),
            previews: previews.clone(),
        }
    }

    fn from_podcast(podcast: &Podcast, previews: &PreviewPool) -> Self {
        Self {
            title: podcast.title.clone(),
            description: podcast.description.clone(),
            kind: podcast.kind,
            video_url: podcast.external_url().unwrap_or_default().to_string(),
            existing_thumbnail: podcast.thumbnail_url.clone(),
            ..Self::empty(previews)
        }
    }

    /// Stage the video file, replacing any previous one.
    ///
    /// Returns `false` (and leaves the previous file staged) when the file is
    /// rejected.
    pub fn attach_video(&mut self, file: LocalFile, notices: &mut Notices) -> bool {
        Self::replace(&mut self.video, UploadPolicy::PODCAST_VIDEO, &self.previews, file, notices)
    }

    /// Stage the thumbnail, replacing any previous one.
    pub fn attach_thumbnail(&mut self, file: LocalFile, notices: &mut Notices) -> bool {
        Self::replace(
            &mut self.thumbnail,
            UploadPolicy::PODCAST_THUMBNAIL,
            &self.previews,
            file,
            notices,
        )
    }

    fn replace(
        slot: &mut UploadManager,
        policy: UploadPolicy,
        previews: &PreviewPool,
        file: LocalFile,
        notices: &mut Notices,
    ) -> bool {
        let mut staged = UploadManager::with_pool(policy, previews.clone());
        if staged.add_files(vec![file], notices).accepted.is_empty() {
            return false;
        }
        *slot = staged;
        true
    }

    pub fn clear_video(&mut self) {
        self.video.clear();
    }

    pub fn clear_thumbnail(&mut self) {
        self.thumbnail.clear();
    }

    #[must_use]
    pub fn video(&self) -> Option<&LocalFile> {
        self.video.entries().first().map(|e| &e.file)
    }

    #[must_use]
    pub fn thumbnail(&self) -> Option<&LocalFile> {
        self.thumbnail.entries().first().map(|e| &e.file)
    }

    /// Preview of the staged thumbnail.
    #[must_use]
    pub fn thumbnail_preview(&self) -> Option<&str> {
        self.thumbnail
            .entries()
            .first()
            .and_then(|e| e.preview.as_ref())
            .map(|p| p.data_url())
    }

    /// Check required fields and build the request body.
    fn payload(&self, mode: &FormMode) -> Result<PodcastPayload, &'static str> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TITLE_REQUIRED);
        }

        let (video_url, video_file) = match self.kind {
            VideoKind::Url => {
                let url = self.video_url.trim();
                if url.is_empty() {
                    return Err(VIDEO_URL_REQUIRED);
                }
                (Some(url.to_string()), None)
            }
            VideoKind::Upload => {
                let file = self.video().cloned();
                // Editing without a new file keeps the stored video.
                if file.is_none() && *mode == FormMode::Create {
                    return Err(VIDEO_FILE_REQUIRED);
                }
                (None, file)
            }
        };

        Ok(PodcastPayload {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            kind: self.kind,
            video_url,
            video_file,
            thumbnail: self.thumbnail().cloned(),
        })
    }
}

/// Where the panel is in its workflow.
#[derive(Debug)]
pub enum PanelState {
    Idle,
    FormOpen { mode: FormMode, draft: PodcastDraft },
    Submitting { mode: FormMode },
    ConfirmDelete(PodcastId),
    AccessDenied,
}

pub struct PodcastPanel {
    session: Option<Session>,
    podcasts: CollectionCache<Podcast, ()>,
    state: PanelState,
    previews: PreviewPool,
    last_fetch: Option<Applied>,
}

impl PodcastPanel {
    /// Build the panel for whoever is signed in, without fetching.
    #[must_use]
    pub fn new(ctx: &SessionContext) -> Self {
        Self::with_previews(ctx, PreviewPool::new())
    }

    /// Like [`PodcastPanel::new`], counting staged previews in `previews`.
    #[must_use]
    pub fn with_previews(ctx: &SessionContext, previews: PreviewPool) -> Self {
        let session = ctx.current().filter(|s| s.is_admin()).cloned();
        let state = if session.is_some() {
            PanelState::Idle
        } else {
            tracing::info!("podcast panel denied to non-admin");
            PanelState::AccessDenied
        };
        Self {
            session,
            podcasts: CollectionCache::new((), usize::MAX, "Failed to load podcasts"),
            state,
            previews,
            last_fetch: None,
        }
    }

    /// Build the panel and, for admins, load the episode list.
    ///
    /// A failed load leaves the list empty; check [`PodcastPanel::last_fetch`].
    pub async fn mount(
        ctx: &SessionContext,
        api: &dyn PodcastBackend,
        notices: &mut Notices,
    ) -> Self {
        let mut panel = Self::new(ctx);
        if !panel.is_denied() {
            let _ = panel.refresh(api, notices).await;
        }
        panel
    }

    #[must_use]
    pub const fn state(&self) -> &PanelState {
        &self.state
    }

    #[must_use]
    pub const fn is_denied(&self) -> bool {
        matches!(self.state, PanelState::AccessDenied)
    }

    /// What to render in place of the panel, if anything.
    #[must_use]
    pub const fn denial_message(&self) -> Option<&'static str> {
        if self.is_denied() {
            Some(ACCESS_DENIED)
        } else {
            None
        }
    }

    /// Outcome of the most recent list fetch, `None` before the first one.
    #[must_use]
    pub const fn last_fetch(&self) -> Option<Applied> {
        self.last_fetch
    }

    #[must_use]
    pub fn podcasts(&self) -> &[Podcast] {
        self.podcasts.items()
    }

    /// The open draft, if any.
    pub fn draft_mut(&mut self) -> Option<&mut PodcastDraft> {
        match &mut self.state {
            PanelState::FormOpen { draft, .. } => Some(draft),
            _ => None,
        }
    }

    #[must_use]
    pub fn draft(&self) -> Option<&PodcastDraft> {
        match &self.state {
            PanelState::FormOpen { draft, .. } => Some(draft),
            _ => None,
        }
    }

    fn admin(&self) -> Result<&Session, PanelError> {
        self.session.as_ref().ok_or(PanelError::AccessDenied)
    }

    fn ensure_not_submitting(&self) -> Result<(), PanelError> {
        if matches!(self.state, PanelState::Submitting { .. }) {
            return Err(PanelError::Busy);
        }
        Ok(())
    }

    /// Re-fetch the episode list.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` for non-admins; no request is made.
    #[instrument(skip_all)]
    pub async fn refresh(
        &mut self,
        api: &dyn PodcastBackend,
        notices: &mut Notices,
    ) -> Result<Applied, PanelError> {
        let Some(session) = self.session.as_ref() else {
            return Err(PanelError::AccessDenied);
        };
        let applied = self
            .podcasts
            .refresh(|()| async move { api.list_podcasts(session).await }, notices)
            .await;
        self.last_fetch = Some(applied);
        Ok(applied)
    }

    /// Open an empty form. Any open draft is discarded.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` for non-admins and `Busy` while saving.
    pub fn open_create(&mut self) -> Result<(), PanelError> {
        self.admin()?;
        self.ensure_not_submitting()?;
        self.state = PanelState::FormOpen {
            mode: FormMode::Create,
            draft: PodcastDraft::empty(&self.previews),
        };
        Ok(())
    }

    /// Open the form seeded from a loaded episode.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `id` is not in the list.
    pub fn open_edit(&mut self, id: &PodcastId) -> Result<(), PanelError> {
        self.admin()?;
        self.ensure_not_submitting()?;
        let podcast = self
            .podcasts
            .items()
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| PanelError::NotFound(id.clone()))?;
        self.state = PanelState::FormOpen {
            mode: FormMode::Edit(id.clone()),
            draft: PodcastDraft::from_podcast(podcast, &self.previews),
        };
        Ok(())
    }

    /// Discard the open draft and its staged files.
    pub fn close_form(&mut self) {
        if matches!(self.state, PanelState::FormOpen { .. }) {
            self.state = PanelState::Idle;
        }
    }

    /// Validate and save the open draft.
    ///
    /// On success the form closes and the list is re-fetched. On failure the
    /// form stays open with the draft intact.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` with the first missing field (no request is made),
    /// `NoForm` when nothing is open, or `Api` when the save fails. Every
    /// failure also pushes an error notice.
    #[instrument(skip_all)]
    pub async fn submit(
        &mut self,
        api: &dyn PodcastBackend,
        notices: &mut Notices,
    ) -> Result<(), PanelError> {
        self.admin()?;
        let (mode, payload) = match &self.state {
            PanelState::FormOpen { mode, draft } => match draft.payload(mode) {
                Ok(payload) => (mode.clone(), payload),
                Err(message) => {
                    notices.error(message);
                    return Err(PanelError::Invalid(message));
                }
            },
            PanelState::Submitting { .. } => return Err(PanelError::Busy),
            _ => return Err(PanelError::NoForm),
        };

        let PanelState::FormOpen { draft, .. } = std::mem::replace(
            &mut self.state,
            PanelState::Submitting { mode: mode.clone() },
        ) else {
            return Err(PanelError::NoForm);
        };

        let session = self.admin()?;
        let result = match &mode {
            FormMode::Create => api.create_podcast(session, payload).await,
            FormMode::Edit(id) => api.update_podcast(session, id, payload).await,
        };

        match result {
            Ok(()) => {
                drop(draft);
                self.state = PanelState::Idle;
                notices.success(match mode {
                    FormMode::Create => "Podcast created successfully",
                    FormMode::Edit(_) => "Podcast updated successfully",
                });
                let _ = self.refresh(api, notices).await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, ?mode, "podcast save failed");
                notices.error(e.user_message("Failed to save podcast"));
                self.state = PanelState::FormOpen { mode, draft };
                Err(e.into())
            }
        }
    }

    /// Ask for confirmation before deleting `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `id` is not in the list.
    pub fn request_delete(&mut self, id: &PodcastId) -> Result<(), PanelError> {
        self.admin()?;
        self.ensure_not_submitting()?;
        if !self.podcasts.items().iter().any(|p| &p.id == id) {
            return Err(PanelError::NotFound(id.clone()));
        }
        self.state = PanelState::ConfirmDelete(id.clone());
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.state, PanelState::ConfirmDelete(_)) {
            self.state = PanelState::Idle;
        }
    }

    /// Delete the episode awaiting confirmation.
    ///
    /// On success the row is removed from the local list without a re-fetch.
    /// On failure the list is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `NothingToConfirm` without a pending request, or `Api` when the
    /// delete fails.
    #[instrument(skip_all)]
    pub async fn confirm_delete(
        &mut self,
        api: &dyn PodcastBackend,
        notices: &mut Notices,
    ) -> Result<(), PanelError> {
        let PanelState::ConfirmDelete(id) = &self.state else {
            return Err(PanelError::NothingToConfirm);
        };
        let id = id.clone();
        self.state = PanelState::Idle;

        let session = self.admin()?;
        match api.delete_podcast(session, &id).await {
            Ok(()) => {
                let removed = self.podcasts.remove_where(|p| p.id == id);
                tracing::info!(podcast_id = %id, removed, "podcast removed from list");
                notices.success("Podcast deleted successfully");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, podcast_id = %id, "podcast delete failed");
                notices.error(e.user_message("Failed to delete podcast"));
                Err(e.into())
            }
        }
    }
}
