//! Content item metadata

use crate::types::{ChannelId, VideoId};
use serde::{Deserialize, Serialize};

/// A single piece of feed content: an opaque video identifier plus the
/// metadata the filtering layer consults.
///
/// The metadata fields are optional because listing endpoints vary: a bare
/// identifier is enough to play, but items without metadata cannot be
/// channel-blocked until a detail lookup fills in `channel_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Identifier used to load the video in the player widget
    pub id: VideoId,

    /// Video title
    #[serde(default)]
    pub title: Option<String>,

    /// Owning channel identifier
    #[serde(default)]
    pub channel_id: Option<ChannelId>,

    /// Owning channel display name
    #[serde(default)]
    pub channel_title: Option<String>,

    /// Video description
    #[serde(default)]
    pub description: Option<String>,
}

impl ContentItem {
    /// Create a bare item from an identifier, without metadata
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: VideoId::new(id),
            title: None,
            channel_id: None,
            channel_title: None,
            description: None,
        }
    }

    /// All text fields the content-safety filter scans, lowercased
    pub fn filter_text(&self) -> String {
        let mut text = String::new();
        for field in [
            self.title.as_deref(),
            self.channel_title.as_deref(),
            self.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        {
            text.push_str(&field.to_lowercase());
            text.push(' ');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_item_has_no_metadata() {
        let item = ContentItem::bare("abc123");
        assert_eq!(item.id.as_str(), "abc123");
        assert!(item.title.is_none());
        assert!(item.channel_id.is_none());
    }

    #[test]
    fn filter_text_joins_lowercased_fields() {
        let item = ContentItem {
            id: VideoId::new("v1"),
            title: Some("Loud NOISES".to_string()),
            channel_id: Some(ChannelId::new("UC1")),
            channel_title: Some("The Channel".to_string()),
            description: Some("A Description".to_string()),
        };

        let text = item.filter_text();
        assert!(text.contains("loud noises"));
        assert!(text.contains("the channel"));
        assert!(text.contains("a description"));
    }
}
