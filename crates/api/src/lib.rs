//! Stitchhouse API - client-side plumbing shared by every page controller.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`client`] - REST client implementing the [`backend`] traits
//! - [`decode`] - One decoder per endpoint; unexpected shapes fail loudly
//! - [`session`] - Signed-in session context and its on-disk store
//! - [`collection`] - Fetched lists with sequence-numbered refreshes
//! - [`upload`] - Local file validation and preview lifetimes
//! - [`notify`] - User-facing notices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod assets;
pub mod backend;
pub mod client;
pub mod collection;
pub mod config;
pub mod decode;
pub mod error;
pub mod filters;
pub mod notify;
pub mod payload;
pub mod session;
pub mod upload;

pub use backend::{CatalogBackend, PodcastBackend, RequestBackend};
pub use client::ApiClient;
pub use collection::{Applied, CollectionCache, FetchTicket};
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use filters::{DesignSort, LogoDesignFilters};
pub use notify::{Notice, NoticeLevel, Notices};
pub use payload::{
    ContactMessage, EmbroideryRequest, FormField, LogoBrief, PodcastPayload, ReferenceImage,
};
pub use session::{AuthUser, Session, SessionContext, SessionStore};
pub use upload::{
    AddOutcome, LocalFile, Preview, PreviewPool, Rejection, UploadEntry, UploadManager,
    UploadPolicy,
};
