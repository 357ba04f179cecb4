//! Core types for Stitchhouse.
//!
//! This module provides type-safe wrappers for the records the backend
//! exchanges with the storefront and admin panels.

pub mod cart;
pub mod catalog;
pub mod email;
pub mod embroidery;
pub mod id;
pub mod package;
pub mod podcast;
pub mod price;
pub mod role;

pub use cart::CartLine;
pub use catalog::CatalogItem;
pub use email::{Email, EmailError};
pub use embroidery::{Budget, EmbroideryType, OptionError, Placement};
pub use id::*;
pub use package::PackageTier;
pub use podcast::{Podcast, VideoKind};
pub use price::Price;
pub use role::Role;
