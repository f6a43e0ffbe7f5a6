//! Request/response types for the video platform API.

use serde::{Deserialize, Serialize};
use shortloop_core::{Category, ChannelId, ContentItem, VideoId};

/// Configuration for connecting to the video platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the video-search API
    pub api_url: String,
    /// API key appended to unauthenticated requests
    pub api_key: Option<String>,
    /// Bearer credential from an identity session, if any
    pub access_token: Option<String>,
    /// Region bias for search results
    pub region_code: String,
    /// Language bias for search results
    pub language_hint: String,
    /// Page size requested from the API
    pub max_results: u32,
}

impl SearchConfig {
    /// Create a configuration with default region/language biases.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: None,
            access_token: None,
            region_code: "US".to_string(),
            language_hint: "en".to_string(),
            max_results: 25,
        }
    }

    /// Create a configuration carrying an API key.
    pub fn with_api_key(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::new(api_url)
        }
    }
}

/// Query-parameter template for a feed category.
///
/// Adding a category is an edit to [`QueryTemplate::for_category`], not new
/// branching logic in the client.
#[derive(Debug, Clone, Copy)]
pub struct QueryTemplate {
    /// Keyword seed passed as the query text
    pub keywords: &'static str,
    /// Result ordering requested from the API
    pub order: &'static str,
    /// Restrict to content published within this many days, if set
    pub published_within_days: Option<i64>,
    /// Duration class filter
    pub duration: &'static str,
}

impl QueryTemplate {
    /// Look up the template for a category.
    ///
    /// `Search` has no template; its query text comes from the request.
    pub fn for_category(category: Category) -> Option<Self> {
        let template = match category {
            Category::Trending => Self {
                keywords: "#shorts trending",
                order: "viewCount",
                published_within_days: Some(7),
                duration: "short",
            },
            Category::Funny => Self {
                keywords: "#shorts funny comedy",
                order: "relevance",
                published_within_days: Some(30),
                duration: "short",
            },
            Category::Music => Self {
                keywords: "#shorts music",
                order: "relevance",
                published_within_days: Some(30),
                duration: "short",
            },
            Category::Gaming => Self {
                keywords: "#shorts gaming",
                order: "relevance",
                published_within_days: Some(30),
                duration: "short",
            },
            Category::Food => Self {
                keywords: "#shorts food cooking",
                order: "relevance",
                published_within_days: Some(30),
                duration: "short",
            },
            Category::Personalized => Self {
                keywords: "#shorts",
                order: "relevance",
                published_within_days: Some(14),
                duration: "short",
            },
            Category::Search => return None,
        };
        Some(template)
    }
}

/// Snippet metadata attached to search and video responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: Option<String>,
    pub channel_id: Option<String>,
    pub channel_title: Option<String>,
    pub description: Option<String>,
}

/// Identifier object returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub video_id: Option<String>,
}

/// One entry in a search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
    pub snippet: Option<Snippet>,
}

/// Response body of the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

/// One entry in a video-details response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoResult {
    pub id: String,
    pub snippet: Option<Snippet>,
}

/// Response body of the video-details endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResult>,
}

/// Basic profile returned by the identity endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub email: String,
    pub picture: Option<String>,
}

pub(crate) fn item_from_snippet(video_id: String, snippet: Option<Snippet>) -> ContentItem {
    let snippet = snippet.unwrap_or(Snippet {
        title: None,
        channel_id: None,
        channel_title: None,
        description: None,
    });
    ContentItem {
        id: VideoId::new(video_id),
        title: snippet.title,
        channel_id: snippet.channel_id.map(ChannelId::new),
        channel_title: snippet.channel_title,
        description: snippet.description,
    }
}
