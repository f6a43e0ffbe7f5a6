//! Feed Events
//!
//! Controller-to-host notifications. The controller never performs IO;
//! instead it queues events the host drains after each call:
//! - `RefillRequested` → run the query against the search collaborator
//! - `ItemChanged` → load the video into the player widget
//! - `BlockListChanged` → persist via the preference store
//! - `StateChanged`/`FeedExhausted`/`HardFailure` → update the UI

use serde::{Deserialize, Serialize};
use shortloop_core::{BlockList, FeedRequest, VideoId};
use crate::types::FeedState;

/// Events emitted by the feed controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeedEvent {
    /// Controller state changed
    StateChanged {
        /// The new state
        state: FeedState,
    },

    /// The cursor moved; the host should load the new item
    ItemChanged {
        /// Identifier to load into the player
        video_id: VideoId,
        /// Previously loaded identifier (if any)
        previous: Option<VideoId>,
    },

    /// Queue contents changed (ingest, eviction, block purge, clear)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// The controller wants more content.
    ///
    /// The host executes the request and calls `ingest` (or
    /// `report_fetch_failure`) with the same generation stamp; responses
    /// carrying a stale generation are discarded.
    RefillRequested {
        /// The query to run
        request: FeedRequest,
        /// Staleness stamp to echo back
        generation: u64,
    },

    /// A failed refill will be retried after a backoff delay
    RefillRetryScheduled {
        /// Retry attempt number (1-based)
        attempt: u32,
        /// Backoff delay in milliseconds
        delay_ms: u64,
    },

    /// The block list was mutated; the host should persist it
    BlockListChanged {
        /// The full updated block list
        block_list: BlockList,
    },

    /// The queue is exhausted and no replacement content is available;
    /// surface a retry affordance
    FeedExhausted,

    /// Too many consecutive playback errors; auto-advance stopped
    HardFailure {
        /// Number of consecutive errors observed
        consecutive_errors: u32,
    },
}
