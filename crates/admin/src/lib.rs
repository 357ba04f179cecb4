//! Stitchhouse Admin - management panels for signed-in administrators.
//!
//! # Access control
//!
//! Panels check the role of the signed-in user when they are created. A
//! non-admin gets an inert panel in the `AccessDenied` state that never
//! touches the backend. This is a courtesy; the backend enforces the real
//! authorization on every call.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod podcasts;

pub use error::{ACCESS_DENIED, PanelError};
pub use podcasts::{FormMode, PanelState, PodcastDraft, PodcastPanel};
