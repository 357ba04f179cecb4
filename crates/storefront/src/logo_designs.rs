//! Custom logo design gallery.
//!
//! The gallery is filtered server side; every filter change issues a new
//! fetch. Changing a filter returns a [`PendingFetch`] which the caller runs
//! and hands back to [`LogoDesignPage::apply`]. Results of superseded fetches
//! are dropped, so answers arriving out of order never clobber newer ones.
//!
//! The page also carries the package picker, up to three reference images
//! and an optional written brief.

use tracing::instrument;

use stitchhouse_api::{
    AddOutcome, Applied, ApiError, CatalogBackend, CollectionCache, DesignSort, FetchTicket,
    LocalFile, LogoBrief, LogoDesignFilters, Notices, RequestBackend, Session, UploadManager,
    UploadPolicy,
};
use stitchhouse_core::{CartLine, CatalogItem, PackageTier, Price};
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{FormError, email, optional, required};

/// Cart category tag for designs and design packages.
pub const CART_CATEGORY: &str = "logo-design";

const PAGE_SIZE: usize = 12;

/// A fetch issued for a specific set of filters.
#[derive(Debug, Clone)]
#[must_use = "run the fetch and pass the result to `LogoDesignPage::apply`"]
pub struct PendingFetch {
    pub ticket: FetchTicket,
    pub filters: LogoDesignFilters,
}

impl PendingFetch {
    /// Perform the request.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend call returned.
    pub async fn run(&self, api: &dyn CatalogBackend) -> Result<Vec<CatalogItem>, ApiError> {
        api.logo_designs(&self.filters).await
    }
}

/// Free-text part of a logo brief.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BriefDraft {
    pub business_name: String,
    pub email: String,
    pub industry: String,
    pub style: String,
    pub notes: String,
}

pub struct LogoDesignPage {
    designs: CollectionCache<CatalogItem, LogoDesignFilters>,
    package: PackageTier,
    references: UploadManager,
    pub brief: BriefDraft,
}

impl Default for LogoDesignPage {
    fn default() -> Self {
        Self::new()
    }
}

impl LogoDesignPage {
    #[must_use]
    pub fn new() -> Self {
        Self::with_uploads(UploadManager::new(UploadPolicy::LOGO_REFERENCES))
    }

    /// Create a page whose reference uploads go through `references`.
    #[must_use]
    pub fn with_uploads(references: UploadManager) -> Self {
        Self {
            designs: CollectionCache::new(
                LogoDesignFilters::default(),
                PAGE_SIZE,
                "Failed to load logo designs",
            ),
            package: PackageTier::default(),
            references,
            brief: BriefDraft::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Filters
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn filters(&self) -> &LogoDesignFilters {
        self.designs.filters()
    }

    fn update(&mut self, change: impl FnOnce(&mut LogoDesignFilters)) -> PendingFetch {
        let mut filters = self.designs.filters().clone();
        change(&mut filters);
        let ticket = self.designs.set_filters(filters.clone());
        tracing::debug!(seq = ticket.seq(), query = %filters.query_string(), "logo design filters changed");
        PendingFetch { ticket, filters }
    }

    /// Fetch with the current filters (initial load).
    pub fn reload(&mut self) -> PendingFetch {
        self.update(|_| {})
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> PendingFetch {
        let search = search.into();
        self.update(|f| f.search = search)
    }

    pub fn set_category(&mut self, category: Option<String>) -> PendingFetch {
        self.update(|f| f.category = category)
    }

    pub fn set_industry(&mut self, industry: Option<String>) -> PendingFetch {
        self.update(|f| f.industry = industry)
    }

    pub fn set_price_range(&mut self, min: Option<Price>, max: Option<Price>) -> PendingFetch {
        self.update(|f| {
            f.min_price = min;
            f.max_price = max;
        })
    }

    pub fn set_sort(&mut self, sort: Option<DesignSort>) -> PendingFetch {
        self.update(|f| f.sort_by = sort)
    }

    /// Replace every filter at once.
    pub fn set_filters(&mut self, filters: LogoDesignFilters) -> PendingFetch {
        self.update(|f| *f = filters)
    }

    /// Apply the result of a fetch issued by one of the setters.
    pub fn apply(
        &mut self,
        fetch: &PendingFetch,
        result: Result<Vec<CatalogItem>, ApiError>,
        notices: &mut Notices,
    ) -> Applied {
        self.designs.apply(fetch.ticket, result, notices)
    }

    /// Issue, run and apply a fetch in one go.
    #[instrument(skip_all)]
    pub async fn fetch(
        &mut self,
        pending: PendingFetch,
        api: &dyn CatalogBackend,
        notices: &mut Notices,
    ) -> Applied {
        let result = pending.run(api).await;
        self.apply(&pending, result, notices)
    }

    #[must_use]
    pub fn designs(&self) -> &[CatalogItem] {
        self.designs.visible()
    }

    #[must_use]
    pub fn all_designs(&self) -> &[CatalogItem] {
        self.designs.items()
    }

    pub fn show_more(&mut self) {
        self.designs.show_more();
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.designs.has_more()
    }

    // -------------------------------------------------------------------------
    // Package picker and cart
    // -------------------------------------------------------------------------

    pub fn select_package(&mut self, tier: PackageTier) {
        self.package = tier;
    }

    #[must_use]
    pub const fn package(&self) -> PackageTier {
        self.package
    }

    /// Add a design from the gallery. Returns `false` for an unknown id.
    pub fn add_design_to_cart(&self, id: &str, cart: &mut dyn Cart, notices: &mut Notices) -> bool {
        let Some(design) = self.designs.items().iter().find(|d| d.id.as_str() == id) else {
            return false;
        };
        cart.add_line(CartLine::from_item(design, CART_CATEGORY));
        notices.success(format!("{} added to cart", design.title));
        true
    }

    /// Add the selected package.
    pub fn add_package_to_cart(&self, cart: &mut dyn Cart, notices: &mut Notices) {
        let line = CartLine::from_package(self.package, CART_CATEGORY);
        notices.success(format!("{} added to cart", line.name));
        cart.add_line(line);
    }

    // -------------------------------------------------------------------------
    // Reference uploads and brief
    // -------------------------------------------------------------------------

    pub fn add_references(&mut self, files: Vec<LocalFile>, notices: &mut Notices) -> AddOutcome {
        self.references.add_files(files, notices)
    }

    pub fn remove_reference(&mut self, id: Uuid) -> bool {
        self.references.remove_file(id).is_some()
    }

    #[must_use]
    pub const fn references(&self) -> &UploadManager {
        &self.references
    }

    /// Validate the brief into a request body.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed field.
    pub fn validate_brief(&self) -> Result<LogoBrief, FormError> {
        let business_name = required(
            "businessName",
            &self.brief.business_name,
            "Business name is required",
        )?;
        let email = email(&self.brief.email)?;
        Ok(LogoBrief {
            business_name,
            email,
            industry: optional(&self.brief.industry),
            style: optional(&self.brief.style),
            notes: self.brief.notes.trim().to_string(),
            package: self.package,
            references: self.references.files(),
        })
    }

    /// Send the brief. On success the brief and its references are cleared.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` before any call when validation fails, `Api` when the
    /// backend call fails. Both also push an error notice.
    #[instrument(skip_all, fields(package = %self.package.as_str()))]
    pub async fn submit_brief(
        &mut self,
        api: &dyn RequestBackend,
        session: Option<&Session>,
        notices: &mut Notices,
    ) -> Result<Option<String>, FormError> {
        let brief = match self.validate_brief() {
            Ok(brief) => brief,
            Err(e) => {
                notices.error(e.to_string());
                return Err(e);
            }
        };

        match api.submit_logo_brief(session, brief).await {
            Ok(message) => {
                notices.success(
                    message
                        .clone()
                        .unwrap_or_else(|| "Your logo request has been submitted".to_string()),
                );
                self.brief = BriefDraft::default();
                self.references.clear();
                Ok(message)
            }
            Err(e) => {
                tracing::warn!(error = %e, "logo brief failed");
                notices.error(e.user_message("Failed to submit logo request"));
                Err(e.into())
            }
        }
    }
}
