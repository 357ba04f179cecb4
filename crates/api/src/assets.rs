//! Asset URL resolution.
//!
//! The backend stores uploads under a path prefix (`/uploads/` by default)
//! and returns them as origin-relative paths. Those are made absolute against
//! the API origin; anything else (external links, CDN URLs) is left alone.

use url::Url;

use stitchhouse_core::{CatalogItem, Podcast};

/// Rewrites backend-relative asset paths into absolute URLs.
#[derive(Debug, Clone)]
pub struct AssetUrls {
    origin: String,
    upload_prefix: String,
}

impl AssetUrls {
    #[must_use]
    pub fn new(api_origin: &Url, upload_prefix: &str) -> Self {
        Self {
            origin: api_origin.as_str().trim_end_matches('/').to_string(),
            upload_prefix: upload_prefix.to_string(),
        }
    }

    /// Absolute URL for `url` when it is an uploaded asset, else `url` verbatim.
    #[must_use]
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with(&self.upload_prefix) {
            format!("{}{url}", self.origin)
        } else {
            url.to_string()
        }
    }

    pub(crate) fn resolve_item(&self, item: &mut CatalogItem) {
        for image in &mut item.images {
            *image = self.resolve(image);
        }
    }

    pub(crate) fn resolve_podcast(&self, podcast: &mut Podcast) {
        podcast.video_url = self.resolve(&podcast.video_url);
        if let Some(thumbnail) = podcast.thumbnail_url.as_mut() {
            *thumbnail = self.resolve(thumbnail);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn assets() -> AssetUrls {
        AssetUrls::new(&Url::parse("https://api.stitchhouse.studio/").unwrap(), "/uploads/")
    }

    #[test]
    fn test_upload_paths_made_absolute() {
        assert_eq!(
            assets().resolve("/uploads/podcasts/ep1.mp4"),
            "https://api.stitchhouse.studio/uploads/podcasts/ep1.mp4"
        );
    }

    #[test]
    fn test_external_urls_verbatim() {
        let a = assets();
        assert_eq!(a.resolve("https://youtu.be/abc"), "https://youtu.be/abc");
        assert_eq!(a.resolve("/static/logo.svg"), "/static/logo.svg");
        assert_eq!(a.resolve(""), "");
    }

    #[test]
    fn test_origin_with_port() {
        let a = AssetUrls::new(&Url::parse("http://127.0.0.1:5000").unwrap(), "/uploads/");
        assert_eq!(a.resolve("/uploads/x.png"), "http://127.0.0.1:5000/uploads/x.png");
    }
}
