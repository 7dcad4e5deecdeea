//! oEmbed metadata for embedded video cards.

use serde::{Deserialize, Serialize};

/// The subset of an oEmbed response shown on a video card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMeta {
    /// Video title.
    pub title: String,

    /// Channel or author name, when the provider sends one.
    #[serde(default)]
    pub author_name: Option<String>,
}

impl VideoMeta {
    /// Parse an oEmbed JSON body.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Canonical watch page for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// oEmbed lookup URL. `encode` percent-encodes a query component.
pub fn oembed_url(endpoint: &str, video_id: &str, encode: impl Fn(&str) -> String) -> String {
    format!(
        "{}?url={}&format=json",
        endpoint.trim_end_matches('?'),
        encode(&watch_url(video_id))
    )
}
