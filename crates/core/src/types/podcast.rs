//! Podcast episodes managed from the admin panel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::PodcastId;

/// Where an episode's video lives.
///
/// This is the variant discriminator of a podcast record: it decides which
/// of the optional fields (`videoUrl` vs. an uploaded `videoFile`) matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VideoKind {
    /// The video file was uploaded to the backend's asset storage.
    Upload,
    /// The video is hosted elsewhere (e.g. a streaming platform link).
    #[default]
    Url,
}

impl VideoKind {
    /// Wire value sent as the `videoType` form field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Url => "url",
        }
    }
}

impl std::fmt::Display for VideoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VideoKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upload" => Ok(Self::Upload),
            "url" => Ok(Self::Url),
            _ => Err(format!("invalid video type: {s}")),
        }
    }
}

/// A podcast episode as listed by `GET /api/podcasts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    #[serde(alias = "_id")]
    pub id: PodcastId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "videoType")]
    pub kind: VideoKind,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Podcast {
    /// The link to edit in a form: only external links are user-editable.
    #[must_use]
    pub fn external_url(&self) -> Option<&str> {
        match self.kind {
            VideoKind::Url => Some(self.video_url.as_str()),
            VideoKind::Upload => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wire_record() {
        let podcast: Podcast = serde_json::from_str(
            r#"{
                "_id": "pc1",
                "title": "Thread Talk #1",
                "description": "Digitizing basics",
                "videoType": "upload",
                "videoUrl": "/uploads/podcasts/ep1.mp4",
                "thumbnailUrl": null,
                "createdAt": "2024-03-01T10:00:00.000Z"
            }"#,
        )
        .unwrap();
        assert_eq!(podcast.kind, VideoKind::Upload);
        assert!(podcast.external_url().is_none());
        assert!(podcast.thumbnail_url.is_none());
    }

    #[test]
    fn test_external_url_only_for_links() {
        let podcast: Podcast = serde_json::from_str(
            r#"{"id":"pc2","title":"Live","videoType":"url","videoUrl":"https://youtu.be/x","createdAt":"2024-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(podcast.external_url(), Some("https://youtu.be/x"));
    }

    #[test]
    fn test_video_kind_round_trips_through_str() {
        for kind in [VideoKind::Upload, VideoKind::Url] {
            assert_eq!(kind.as_str().parse::<VideoKind>().unwrap(), kind);
        }
        assert!("vimeo".parse::<VideoKind>().is_err());
    }
}
