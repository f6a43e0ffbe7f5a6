//! ShortLoop Core
//!
//! Platform-agnostic core types, traits, and error handling for ShortLoop.
//!
//! This crate provides the foundational building blocks shared by the feed
//! controller, the search client, and the preference store.
//!
//! The core crate defines:
//! - **Domain Types**: `ContentItem`, `Category`, `FeedRequest`, `BlockList`
//! - **Collaborator Traits**: `VideoCatalog`, `PreferenceStore`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use shortloop_core::{BlockList, Category, ContentItem, FeedRequest, VideoId};
//!
//! let request = FeedRequest::category(Category::Trending);
//! assert!(request.query.is_none());
//!
//! let mut blocked = BlockList::default();
//! blocked.block_video(VideoId::new("abc123"));
//! assert!(blocked.contains_video(&VideoId::new("abc123")));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use traits::{PreferenceStore, VideoCatalog};
pub use types::{BlockList, Category, ChannelId, ContentItem, FeedRequest, VideoId};
