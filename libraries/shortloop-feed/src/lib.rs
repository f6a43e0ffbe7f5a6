//! ShortLoop - Feed Management
//!
//! Platform-agnostic feed management for ShortLoop.
//!
//! This crate provides:
//! - Bounded, duplicate-free content queue with a playback cursor
//! - Refill policy (cadence-based and wrap-triggered background requests)
//! - Player lifecycle state machine with debounced auto-advance
//! - Consecutive-error circuit breaker
//! - Block-list filtering and content-safety filtering on ingest
//! - Centralized retry/backoff for failed feed requests
//!
//! # Architecture
//!
//! `shortloop-feed` is completely platform-agnostic:
//! - No dependency on the embedding player widget
//! - No dependency on the HTTP search client
//! - No dependency on shortloop-storage (persistence)
//!
//! The UI shell owns one [`FeedController`], feeds it player lifecycle
//! events and search results, and drains [`FeedEvent`]s to drive the player
//! widget, execute network requests, and persist preferences. All mutation
//! happens on the host's event loop; the controller never blocks.
//!
//! # Example
//!
//! ```rust
//! use shortloop_core::ContentItem;
//! use shortloop_feed::{AdvanceOutcome, FeedConfig, FeedController, FeedEvent};
//!
//! let mut controller = FeedController::new(FeedConfig::default());
//!
//! // Session start: no prior identity, so the trending feed is requested.
//! controller.initialize(false);
//! let events = controller.drain_events();
//! assert!(matches!(events[1], FeedEvent::RefillRequested { .. }));
//!
//! // The host runs the request and forwards the results.
//! let generation = controller.generation();
//! controller.ingest(generation, vec![
//!     ContentItem::bare("first"),
//!     ContentItem::bare("second"),
//! ]);
//! assert_eq!(controller.current().unwrap().id.as_str(), "first");
//!
//! // Advancing returns the next item synchronously.
//! match controller.advance() {
//!     AdvanceOutcome::Item(item) => assert_eq!(item.id.as_str(), "second"),
//!     AdvanceOutcome::NeedsRefill => unreachable!(),
//! }
//! ```

#![forbid(unsafe_code)]

mod controller;
mod error;
mod events;
mod filter;
mod queue;
mod retry;
pub mod types;

// Public exports
pub use controller::FeedController;
pub use error::{FeedError, Result};
pub use events::FeedEvent;
pub use filter::SafetyFilter;
pub use queue::FeedQueue;
pub use retry::RetryPolicy;
pub use types::{
    AdvanceOutcome, CategorySwitchPolicy, EndOfQueuePolicy, FeedConfig, FeedState, PlayerEvent,
};
