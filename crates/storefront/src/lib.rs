//! Stitchhouse Storefront - public page controllers.
//!
//! Each controller owns the local state of one page and talks to the backend
//! only through the traits in [`stitchhouse_api::backend`], so it can be
//! driven by the CLI or by tests with an in-memory backend.
//!
//! # Modules
//!
//! - [`catalog`] - Product listing with "show more"
//! - [`logo_designs`] - Filtered design gallery, package picker, logo brief
//! - [`embroidery`] - Custom embroidery request form
//! - [`contact`] - Contact form
//! - [`cart`] - Cart collaborator and an in-memory implementation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod contact;
pub mod embroidery;
pub mod error;
pub mod logo_designs;

#[cfg(test)]
mod testing;

pub use cart::{Cart, MemoryCart};
pub use catalog::ProductCatalog;
pub use contact::{ContactDraft, ContactForm};
pub use embroidery::{EmbroideryDraft, EmbroideryForm};
pub use error::{FormError, ValidationError};
pub use logo_designs::{BriefDraft, LogoDesignPage, PendingFetch};
