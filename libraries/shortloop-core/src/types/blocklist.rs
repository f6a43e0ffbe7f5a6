//! User-curated denylist of videos and channels

use crate::types::{ChannelId, ContentItem, VideoId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Two string sets: blocked video identifiers and blocked channel
/// identifiers.
///
/// Loaded once at startup from the preference store and written back on
/// every mutation. All mutations are idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockList {
    /// Blocked video identifiers
    pub videos: HashSet<VideoId>,

    /// Blocked channel identifiers
    pub channels: HashSet<ChannelId>,
}

impl BlockList {
    /// Create an empty block list
    pub fn new() -> Self {
        Self::default()
    }

    /// Block a video. Returns `true` if it was newly added.
    pub fn block_video(&mut self, id: VideoId) -> bool {
        self.videos.insert(id)
    }

    /// Block a channel. Returns `true` if it was newly added.
    pub fn block_channel(&mut self, id: ChannelId) -> bool {
        self.channels.insert(id)
    }

    /// Check whether a video identifier is blocked
    pub fn contains_video(&self, id: &VideoId) -> bool {
        self.videos.contains(id)
    }

    /// Check whether a channel identifier is blocked
    pub fn contains_channel(&self, id: &ChannelId) -> bool {
        self.channels.contains(id)
    }

    /// Filter predicate: does this item match the block list?
    ///
    /// Matches on the video identifier or, when metadata carries one, the
    /// channel identifier.
    pub fn matches(&self, item: &ContentItem) -> bool {
        if self.videos.contains(&item.id) {
            return true;
        }
        item.channel_id
            .as_ref()
            .is_some_and(|channel| self.channels.contains(channel))
    }

    /// Total number of blocked entries
    pub fn len(&self) -> usize {
        self.videos.len() + self.channels.len()
    }

    /// Check whether nothing is blocked
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty() && self.channels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_channel(video: &str, channel: &str) -> ContentItem {
        ContentItem {
            id: VideoId::new(video),
            title: None,
            channel_id: Some(ChannelId::new(channel)),
            channel_title: None,
            description: None,
        }
    }

    #[test]
    fn blocking_is_idempotent() {
        let mut list = BlockList::new();
        assert!(list.block_video(VideoId::new("v1")));
        assert!(!list.block_video(VideoId::new("v1")));
        assert_eq!(list.videos.len(), 1);
    }

    #[test]
    fn matches_on_video_id() {
        let mut list = BlockList::new();
        list.block_video(VideoId::new("v1"));

        assert!(list.matches(&ContentItem::bare("v1")));
        assert!(!list.matches(&ContentItem::bare("v2")));
    }

    #[test]
    fn matches_on_channel_id() {
        let mut list = BlockList::new();
        list.block_channel(ChannelId::new("UC1"));

        assert!(list.matches(&item_with_channel("v1", "UC1")));
        assert!(!list.matches(&item_with_channel("v1", "UC2")));
        // Bare items carry no channel to match on
        assert!(!list.matches(&ContentItem::bare("v1")));
    }

    #[test]
    fn round_trips_through_json() {
        let mut list = BlockList::new();
        list.block_video(VideoId::new("v1"));
        list.block_channel(ChannelId::new("UC1"));

        let json = serde_json::to_string(&list).unwrap();
        let restored: BlockList = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, list);
    }
}
