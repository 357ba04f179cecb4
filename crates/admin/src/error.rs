//! Admin panel errors.

use thiserror::Error;

use stitchhouse_api::ApiError;
use stitchhouse_core::PodcastId;

/// Message shown instead of the podcast panel to non-admins.
pub const ACCESS_DENIED: &str = "You do not have permission to manage podcasts.";

/// Why a panel operation did not happen.
#[derive(Debug, Error)]
pub enum PanelError {
    /// The signed-in user is not an admin (or nobody is signed in).
    #[error("You do not have permission to manage podcasts.")]
    AccessDenied,

    /// A required field is missing. Nothing was sent.
    #[error("{0}")]
    Invalid(&'static str),

    /// The operation needs an open form.
    #[error("No podcast form is open")]
    NoForm,

    /// A save is already in flight.
    #[error("A podcast is already being saved")]
    Busy,

    /// The id is not in the loaded list.
    #[error("Podcast not found: {0}")]
    NotFound(PodcastId),

    /// `confirm_delete` without a preceding `request_delete`.
    #[error("No deletion is awaiting confirmation")]
    NothingToConfirm,

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}
