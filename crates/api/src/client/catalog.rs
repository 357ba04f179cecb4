//! Product and logo design listings.

use async_trait::async_trait;
use tracing::instrument;

use stitchhouse_core::CatalogItem;

use super::ApiClient;
use crate::backend::CatalogBackend;
use crate::decode;
use crate::error::ApiError;
use crate::filters::LogoDesignFilters;

#[async_trait]
impl CatalogBackend for ApiClient {
    #[instrument(skip(self))]
    async fn products(&self, limit: u32) -> Result<Vec<CatalogItem>, ApiError> {
        let mut url = self.endpoint("/api/products")?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());

        let body = self.send(decode::PRODUCTS, self.get(url)).await?;
        let mut items = decode::products(body)?;
        for item in &mut items {
            self.assets().resolve_item(item);
        }
        tracing::debug!(count = items.len(), "products fetched");
        Ok(items)
    }

    #[instrument(skip(self), fields(query = %filters.query_string()))]
    async fn logo_designs(
        &self,
        filters: &LogoDesignFilters,
    ) -> Result<Vec<CatalogItem>, ApiError> {
        let mut url = self.endpoint("/api/custom-logo-designs")?;
        let query = filters.query_string();
        if !query.is_empty() {
            url.set_query(Some(&query));
        }

        let body = self.send(decode::LOGO_DESIGNS, self.get(url)).await?;
        let mut items = decode::logo_designs(body)?;
        for item in &mut items {
            self.assets().resolve_item(item);
        }
        tracing::debug!(count = items.len(), "logo designs fetched");
        Ok(items)
    }
}
