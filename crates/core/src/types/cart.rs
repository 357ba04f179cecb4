//! Cart line projection.
//!
//! The cart itself belongs to an external collaborator; this is the minimal
//! record the storefront hands over when the customer adds something.

use serde::{Deserialize, Serialize};

use super::catalog::CatalogItem;
use super::package::PackageTier;
use super::price::Price;

/// One line in the customer's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub name: String,
    pub unit_price: Price,
    pub image: Option<String>,
    pub category: String,
    pub quantity: u32,
}

impl CartLine {
    /// Project a catalog item into a cart line tagged with `category`.
    #[must_use]
    pub fn from_item(item: &CatalogItem, category: &str) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.title.clone(),
            unit_price: item.price,
            image: item.primary_image().map(str::to_owned),
            category: category.to_owned(),
            quantity: 1,
        }
    }

    /// Project a service package into a cart line.
    #[must_use]
    pub fn from_package(tier: PackageTier, category: &str) -> Self {
        Self {
            id: format!("{category}-{}", tier.as_str()),
            name: format!("{} Package", tier.label()),
            unit_price: tier.price(),
            image: None,
            category: category.to_owned(),
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}
