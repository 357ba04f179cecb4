//! Catalog records: ready-made products and custom logo designs.

use serde::{Deserialize, Deserializer, Serialize};

use super::id::CatalogItemId;
use super::price::Price;

/// A product or design as listed by the backend.
///
/// The catalog endpoints are not consistent about field names, so the
/// common aliases (`_id`, `name`, `image`) are accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(alias = "_id")]
    pub id: CatalogItemId,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default, alias = "image", deserialize_with = "one_or_many")]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl CatalogItem {
    /// The image shown on listing cards, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Accept either a single image URL or a list of them.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Missing(Option<()>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(url) if url.is_empty() => Vec::new(),
        OneOrMany::One(url) => vec![url],
        OneOrMany::Many(urls) => urls,
        OneOrMany::Missing(_) => Vec::new(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_shape() {
        let item: CatalogItem = serde_json::from_str(
            r#"{"_id":"p1","name":"Club Polo","price":34.5,"images":["/uploads/polo.png"],"category":"apparel","rating":4.6}"#,
        )
        .unwrap();
        assert_eq!(item.id.as_str(), "p1");
        assert_eq!(item.title, "Club Polo");
        assert_eq!(item.primary_image(), Some("/uploads/polo.png"));
        assert_eq!(item.price, Price::from_cents(3450));
    }

    #[test]
    fn test_design_shape_single_image() {
        let item: CatalogItem = serde_json::from_str(
            r#"{"id":"d7","title":"Mountain Crest","description":"","price":"1200","image":"https://cdn.example.com/crest.svg","industry":"outdoors"}"#,
        )
        .unwrap();
        assert_eq!(item.images, vec!["https://cdn.example.com/crest.svg".to_string()]);
        assert_eq!(item.industry.as_deref(), Some("outdoors"));
        assert!(item.rating.is_none());
    }

    #[test]
    fn test_null_image_is_empty() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"id":"d8","title":"Plain","price":10,"image":null}"#).unwrap();
        assert!(item.images.is_empty());
        assert!(item.primary_image().is_none());
    }

    #[test]
    fn test_missing_price_is_rejected() {
        assert!(serde_json::from_str::<CatalogItem>(r#"{"id":"x","title":"No price"}"#).is_err());
    }
}
