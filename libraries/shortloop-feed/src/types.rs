//! Core types for feed management

use serde::{Deserialize, Serialize};
use shortloop_core::ContentItem;
use std::time::Duration;

/// Lifecycle events reported by the embedding player widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// The player widget finished initializing
    Ready,

    /// Playback started or resumed
    Playing,

    /// Playback paused by the user or the widget
    Paused,

    /// The widget is buffering
    Buffering,

    /// A video was loaded but not yet started
    Cued,

    /// The current video reached its end
    Ended,

    /// The widget reported a playback error
    Error(u32),
}

/// Feed controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedState {
    /// Not yet initialized
    Idle,

    /// Waiting for the first usable feed response
    Loading,

    /// An item is selected and handed to the player
    Ready,

    /// The player reported active playback
    Playing,

    /// The player reported paused/buffering
    Paused,

    /// The queue is empty and no replacement content is available;
    /// the host should surface a retry affordance
    Exhausted,

    /// The consecutive-error circuit breaker tripped; auto-advance stopped
    Failed,
}

/// What happens when the cursor advances past the last queued item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndOfQueuePolicy {
    /// Wrap to the start of the queue, requesting fresh content in the
    /// background when the queue is long enough (the default)
    Wrap,

    /// Never repeat: request fresh content and report `NeedsRefill`
    /// until it arrives
    FetchAhead,
}

/// What happens to the queue when the user switches category or searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategorySwitchPolicy {
    /// Clear the queue before requesting the new category (the default)
    Replace,

    /// Keep existing items and merge the new results in
    Merge,
}

/// Result of a cursor advance
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// The next item to load into the player
    Item(ContentItem),

    /// Nothing playable is available; a refill has been requested and the
    /// host should show a loading/retry state
    NeedsRefill,
}

/// Configuration for the feed controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Maximum retained queue size (default: 200)
    pub max_queue_len: usize,

    /// Items kept before the cursor when evicting (default: 10)
    pub trailing_margin: usize,

    /// Issue a background refill every Nth position (default: 5, 0 disables)
    pub refill_cadence: usize,

    /// Minimum queue length for a wrap to trigger a background refill
    /// (default: 3)
    pub min_wrap_refill: usize,

    /// Debounce before a scheduled auto-advance executes (default: 350 ms)
    pub advance_debounce: Duration,

    /// Consecutive player errors before the circuit breaker trips
    /// (default: 5)
    pub error_threshold: u32,

    /// End-of-queue behavior (default: `Wrap`)
    pub end_of_queue: EndOfQueuePolicy,

    /// Category-switch behavior (default: `Replace`)
    pub category_switch: CategorySwitchPolicy,

    /// Continuous play: auto-advance when a video ends (default: true)
    pub autoplay: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_queue_len: 200,
            trailing_margin: 10,
            refill_cadence: 5,
            min_wrap_refill: 3,
            advance_debounce: Duration::from_millis(350),
            error_threshold: 5,
            end_of_queue: EndOfQueuePolicy::Wrap,
            category_switch: CategorySwitchPolicy::Replace,
            autoplay: true,
        }
    }
}
