//! Stitchhouse Core - Shared domain types.
//!
//! This crate provides the records exchanged with the Stitchhouse backend and
//! used by every other crate in the workspace:
//! - `api` - REST client, uploads, session and collection caching
//! - `storefront` - Public page controllers (catalog, designs, requests, contact)
//! - `admin` - Podcast management panel
//! - `cli` - Command-line front-end
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! Records here are never persisted locally; they live for one page session.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, roles and the catalog/podcast records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
