//! Product catalog page.
//!
//! Everything is fetched up front with a single `limit`; "show more" only
//! reveals more of what is already in memory.

use tracing::instrument;

use stitchhouse_api::{Applied, CatalogBackend, CollectionCache, Notices};
use stitchhouse_core::{CartLine, CatalogItem};

use crate::cart::Cart;

/// Products revealed per "show more".
pub const PAGE_SIZE: usize = 8;

/// Products requested from the backend.
pub const DEFAULT_LIMIT: u32 = 48;

/// Cart category tag for catalog products.
pub const CART_CATEGORY: &str = "product";

pub struct ProductCatalog {
    cache: CollectionCache<CatalogItem, u32>,
}

impl ProductCatalog {
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            cache: CollectionCache::new(limit, PAGE_SIZE, "Failed to load products"),
        }
    }

    /// Fetch the catalog, replacing whatever was loaded before.
    #[instrument(skip_all, fields(limit = *self.cache.filters()))]
    pub async fn load(&mut self, api: &dyn CatalogBackend, notices: &mut Notices) -> Applied {
        self.cache
            .refresh(|limit| async move { api.products(limit).await }, notices)
            .await
    }

    /// Products currently on screen.
    #[must_use]
    pub fn visible(&self) -> &[CatalogItem] {
        self.cache.visible()
    }

    #[must_use]
    pub fn all(&self) -> &[CatalogItem] {
        self.cache.items()
    }

    pub fn show_more(&mut self) {
        self.cache.show_more();
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.cache.has_more()
    }

    /// Add a loaded product to `cart`. Returns `false` for an unknown id.
    pub fn add_to_cart(&self, id: &str, cart: &mut dyn Cart, notices: &mut Notices) -> bool {
        let Some(item) = self.cache.items().iter().find(|i| i.id.as_str() == id) else {
            return false;
        };
        cart.add_line(CartLine::from_item(item, CART_CATEGORY));
        notices.success(format!("{} added to cart", item.title));
        true
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stitchhouse_api::NoticeLevel;

    use super::*;
    use crate::cart::MemoryCart;
    use crate::testing::{Call, FakeBackend};

    #[tokio::test]
    async fn test_load_requests_limit_and_pages_by_eight() {
        let api = FakeBackend::with_items(20);
        let mut notices = Notices::new();
        let mut catalog = ProductCatalog::new(20);

        assert_eq!(catalog.load(&api, &mut notices).await, Applied::Replaced(20));
        assert_eq!(api.calls(), [Call::Products(20)]);
        assert_eq!(catalog.visible().len(), 8);

        catalog.show_more();
        assert_eq!(catalog.visible().len(), 16);
        catalog.show_more();
        assert_eq!(catalog.visible().len(), 20);
        assert!(!catalog.has_more());
    }

    #[tokio::test]
    async fn test_failure_empties_catalog() {
        let mut notices = Notices::new();
        let mut catalog = ProductCatalog::default();
        let _ = catalog.load(&FakeBackend::with_items(3), &mut notices).await;

        let applied = catalog
            .load(&FakeBackend::failing(503, None), &mut notices)
            .await;
        assert_eq!(applied, Applied::Cleared);
        assert!(catalog.all().is_empty());
        assert_eq!(notices.last().unwrap().message, "Failed to load products");
        assert_eq!(notices.count(NoticeLevel::Error), 1);
    }

    #[tokio::test]
    async fn test_add_to_cart() {
        let mut notices = Notices::new();
        let mut catalog = ProductCatalog::default();
        let _ = catalog.load(&FakeBackend::with_items(2), &mut notices).await;

        let mut cart = MemoryCart::new();
        assert!(catalog.add_to_cart("item-1", &mut cart, &mut notices));
        assert!(!catalog.add_to_cart("missing", &mut cart, &mut notices));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].category, CART_CATEGORY);
        assert_eq!(notices.last().unwrap().message, "Design item-1 added to cart");
    }
}
