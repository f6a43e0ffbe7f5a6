/// Collaborator traits for ShortLoop
use crate::error::Result;
use crate::types::{BlockList, ContentItem, FeedRequest, VideoId};
use async_trait::async_trait;

/// Remote video catalog
///
/// Implemented by the search client; the UI shell drives it and forwards
/// results into the feed controller. Query failures the platform treats as
/// quota/auth conditions surface as an empty listing, not an error.
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    /// Execute a content query and return the matching items
    async fn search(&self, request: &FeedRequest) -> Result<Vec<ContentItem>>;

    /// Look up full metadata for a single video
    ///
    /// Used to resolve a channel identifier before channel-blocking an item
    /// whose listing lacked one. Returns `None` for unknown identifiers.
    async fn video_details(&self, id: &VideoId) -> Result<Option<ContentItem>>;
}

/// Local key-value preference boundary
///
/// Read once at session start, written on every block-list mutation.
pub trait PreferenceStore: Send {
    /// Load the persisted block list, or an empty one if nothing is stored
    fn load_block_list(&self) -> Result<BlockList>;

    /// Persist the block list
    fn save_block_list(&self, block_list: &BlockList) -> Result<()>;
}
