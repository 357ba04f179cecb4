//! Remote collection cache: a fetched list plus the filters that produced it.
//!
//! Every filter change issues a new fetch (there is no debouncing) and each
//! fetch replaces the list wholesale. Fetches are tagged with a
//! [`FetchTicket`] carrying a monotonically increasing sequence number; a
//! result whose ticket is not the latest one issued is discarded, so a slow
//! response to an old query can never overwrite the results of a newer one.
//!
//! A failed fetch empties the list and pushes an error notice. There is no
//! retry.

use std::future::Future;

use crate::error::ApiError;
use crate::notify::Notices;

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a ticket must be passed back to `apply`"]
pub struct FetchTicket {
    seq: u64,
}

impl FetchTicket {
    #[must_use]
    pub const fn seq(self) -> u64 {
        self.seq
    }
}

/// What [`CollectionCache::apply`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The list was replaced with this many items.
    Replaced(usize),
    /// The fetch failed; the list was cleared.
    Cleared,
    /// A newer fetch was issued since; the result was dropped.
    Stale,
}

/// In-memory list of records fetched with filters `F`.
#[derive(Debug)]
pub struct CollectionCache<T, F> {
    items: Vec<T>,
    filters: F,
    issued: u64,
    page_size: usize,
    visible: usize,
    error_message: &'static str,
}

impl<T, F: Clone> CollectionCache<T, F> {
    /// Create an empty cache.
    ///
    /// `page_size` is the "show more" step; `error_message` is the notice
    /// shown when a fetch fails.
    #[must_use]
    pub const fn new(filters: F, page_size: usize, error_message: &'static str) -> Self {
        Self {
            items: Vec::new(),
            filters,
            issued: 0,
            page_size,
            visible: page_size,
            error_message,
        }
    }

    #[must_use]
    pub const fn filters(&self) -> &F {
        &self.filters
    }

    /// Replace the filters and issue a fetch for them.
    pub fn set_filters(&mut self, filters: F) -> FetchTicket {
        self.filters = filters;
        self.begin_fetch()
    }

    /// Issue a fetch for the current filters.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket { seq: self.issued }
    }

    /// Whether `ticket` is the most recently issued one.
    #[must_use]
    pub const fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.seq == self.issued
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<T>, ApiError>,
        notices: &mut Notices,
    ) -> Applied {
        if !self.is_current(ticket) {
            tracing::debug!(seq = ticket.seq, latest = self.issued, "dropping stale fetch result");
            return Applied::Stale;
        }

        self.visible = self.page_size;
        match result {
            Ok(items) => {
                let count = items.len();
                self.items = items;
                Applied::Replaced(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "collection fetch failed");
                self.items.clear();
                notices.error(self.error_message);
                Applied::Cleared
            }
        }
    }

    /// Fetch with the current filters and apply the result.
    pub async fn refresh<Fetch, Fut>(&mut self, fetch: Fetch, notices: &mut Notices) -> Applied
    where
        Fetch: FnOnce(F) -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let ticket = self.begin_fetch();
        let result = fetch(self.filters.clone()).await;
        self.apply(ticket, result, notices)
    }

    /// Every fetched item.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The items currently revealed by "show more".
    #[must_use]
    pub fn visible(&self) -> &[T] {
        let end = self.visible.min(self.items.len());
        self.items.get(..end).unwrap_or_default()
    }

    /// Reveal another page.
    pub fn show_more(&mut self) {
        self.visible = self.visible.saturating_add(self.page_size);
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.visible < self.items.len()
    }

    /// Remove matching items locally without re-fetching.
    ///
    /// Returns how many items were removed.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !pred(item));
        before - self.items.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notify::NoticeLevel;

    fn cache() -> CollectionCache<u32, String> {
        CollectionCache::new(String::new(), 2, "Failed to load items")
    }

    #[test]
    fn test_success_replaces_list() {
        let mut notices = Notices::new();
        let mut c = cache();
        let t = c.begin_fetch();
        assert_eq!(c.apply(t, Ok(vec![1, 2, 3]), &mut notices), Applied::Replaced(3));
        let t = c.begin_fetch();
        assert_eq!(c.apply(t, Ok(vec![9]), &mut notices), Applied::Replaced(1));
        assert_eq!(c.items(), &[9]);
    }

    #[test]
    fn test_failure_clears_and_notifies() {
        let mut notices = Notices::new();
        let mut c = cache();
        let t = c.begin_fetch();
        let _ = c.apply(t, Ok(vec![1, 2]), &mut notices);

        let t = c.set_filters("modern".to_string());
        let result = Err(ApiError::Backend {
            status: 500,
            message: None,
        });
        assert_eq!(c.apply(t, result, &mut notices), Applied::Cleared);
        assert!(c.is_empty());
        assert_eq!(notices.count(NoticeLevel::Error), 1);
        assert_eq!(notices.last().unwrap().message, "Failed to load items");
    }

    #[test]
    fn test_out_of_order_response_is_discarded() {
        let mut notices = Notices::new();
        let mut c = cache();

        let slow = c.set_filters("m".to_string());
        let fast = c.set_filters("mo".to_string());
        assert!(slow.seq() < fast.seq());

        assert_eq!(c.apply(fast, Ok(vec![2]), &mut notices), Applied::Replaced(1));
        assert_eq!(c.apply(slow, Ok(vec![1, 1, 1]), &mut notices), Applied::Stale);
        assert_eq!(c.items(), &[2]);
    }

    #[test]
    fn test_stale_failure_does_not_clear() {
        let mut notices = Notices::new();
        let mut c = cache();
        let old = c.begin_fetch();
        let new = c.begin_fetch();
        let _ = c.apply(new, Ok(vec![5]), &mut notices);
        let result = Err(ApiError::Unauthenticated);
        assert_eq!(c.apply(old, result, &mut notices), Applied::Stale);
        assert_eq!(c.items(), &[5]);
        assert!(notices.is_empty());
    }

    #[test]
    fn test_show_more_pages_through() {
        let mut notices = Notices::new();
        let mut c = cache();
        let t = c.begin_fetch();
        let _ = c.apply(t, Ok(vec![1, 2, 3, 4, 5]), &mut notices);

        assert_eq!(c.visible(), &[1, 2]);
        assert!(c.has_more());
        c.show_more();
        c.show_more();
        assert_eq!(c.visible(), &[1, 2, 3, 4, 5]);
        assert!(!c.has_more());
    }

    #[test]
    fn test_remove_where() {
        let mut notices = Notices::new();
        let mut c = cache();
        let t = c.begin_fetch();
        let _ = c.apply(t, Ok(vec![1, 2, 3]), &mut notices);
        assert_eq!(c.remove_where(|v| *v == 2), 1);
        assert_eq!(c.items(), &[1, 3]);
        assert_eq!(c.remove_where(|v| *v == 42), 0);
    }

    #[tokio::test]
    async fn test_refresh_passes_current_filters() {
        let mut notices = Notices::new();
        let mut c = cache();
        let _ = c.set_filters("vintage".to_string());
        let applied = c
            .refresh(
                |filters| async move {
                    assert_eq!(filters, "vintage");
                    Ok(vec![7])
                },
                &mut notices,
            )
            .await;
        assert_eq!(applied, Applied::Replaced(1));
    }
}
