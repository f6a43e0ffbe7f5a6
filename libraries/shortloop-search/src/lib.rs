//! ShortLoop Search
//!
//! HTTP client library for the remote video platform and identity provider.
//!
//! # Features
//!
//! - **Content search**: category-template queries and free-text search
//! - **Video details**: single-item metadata lookup for channel resolution
//! - **Identity**: bearer-profile fetch with account allow-listing
//!
//! # Example
//!
//! ```ignore
//! use shortloop_core::{Category, FeedRequest};
//! use shortloop_search::{SearchClient, SearchConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SearchConfig::with_api_key("https://video.example.com/api", "key123");
//!     let client = SearchClient::new(config)?;
//!
//!     let items = client.search(&FeedRequest::category(Category::Trending)).await?;
//!     println!("Fetched {} clips", items.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod types;

// Re-export main types
pub use auth::IdentityClient;
pub use client::SearchClient;
pub use error::{Result, SearchError};
pub use types::{
    QueryTemplate, SearchConfig, SearchResponse, SearchResult, SearchResultId, Snippet,
    UserProfile, VideoListResponse, VideoResult,
};
