//! Client for the remote video-search API.

use crate::error::{Result, SearchError};
use crate::types::{
    item_from_snippet, QueryTemplate, SearchConfig, SearchResponse, VideoListResponse,
};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, SecondsFormat, Utc};
use reqwest::Client;
use shortloop_core::{Category, ContentItem, CoreError, FeedRequest, VideoCatalog, VideoId};
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the video platform's search and video-details endpoints.
///
/// Quota and auth failures (HTTP 400/403) surface as an empty result so the
/// feed controller can keep serving whatever it already has; every other
/// failure is a real [`SearchError`] the controller's retry policy handles.
///
/// # Example
///
/// ```ignore
/// use shortloop_core::FeedRequest;
/// use shortloop_search::{SearchClient, SearchConfig};
///
/// let config = SearchConfig::with_api_key("https://video.example.com", "key123");
/// let client = SearchClient::new(config)?;
///
/// let items = client.search(&FeedRequest::search("lofi beats")).await?;
/// println!("Got {} clips", items.len());
/// ```
pub struct SearchClient {
    http: Client,
    config: SearchConfig,
}

impl SearchClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SearchConfig) -> Result<Self> {
        // Validate URL
        if config.api_url.is_empty() {
            return Err(SearchError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let api_url = config.api_url.trim_end_matches('/').to_string();
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(SearchError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("ShortLoop/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SearchError::Request)?;

        Ok(Self {
            http,
            config: SearchConfig { api_url, ..config },
        })
    }

    /// The normalized API base URL.
    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    /// Set the bearer credential used for personalized queries.
    pub fn set_access_token(&mut self, access_token: Option<String>) {
        self.config.access_token = access_token;
    }

    /// Execute a feed request against the search endpoint.
    ///
    /// Returns the surviving items in response order. HTTP 400 and 403
    /// (quota exhausted, key rejected) return an empty list with a warning.
    pub async fn search(&self, request: &FeedRequest) -> Result<Vec<ContentItem>> {
        let url = format!("{}/search", self.config.api_url);
        let params = self.query_params(request)?;

        debug!(
            url = %url,
            category = ?request.category,
            "Fetching feed content"
        );

        let mut builder = self.http.get(&url).query(&params);
        if let Some(token) = &self.config.access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                SearchError::Unreachable(e.to_string())
            } else {
                SearchError::Request(e)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            let body: SearchResponse = response.json().await.map_err(|e| {
                SearchError::ParseError(format!("Failed to parse search response: {}", e))
            })?;

            let items: Vec<ContentItem> = body
                .items
                .into_iter()
                .filter_map(|result| {
                    result
                        .id
                        .video_id
                        .map(|id| item_from_snippet(id, result.snippet))
                })
                .collect();

            debug!(
                category = ?request.category,
                results = items.len(),
                "Feed fetch complete"
            );

            Ok(items)
        } else if status.as_u16() == 400 || status.as_u16() == 403 {
            // Quota or key failure: degrade to an empty page, the feed keeps
            // playing what it already holds
            let error_text = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                category = ?request.category,
                error = %error_text,
                "Search quota/auth failure, returning empty result"
            );
            Ok(Vec::new())
        } else if status.as_u16() == 401 {
            Err(SearchError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(SearchError::ApiError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Look up full metadata for a single video.
    ///
    /// Used to resolve a channel identifier when the feed item arrived
    /// without one. Returns `None` when the platform no longer knows the id.
    pub async fn video_details(&self, id: &VideoId) -> Result<Option<ContentItem>> {
        let url = format!("{}/videos", self.config.api_url);

        let mut params = vec![
            ("part".to_string(), "snippet".to_string()),
            ("id".to_string(), id.as_str().to_string()),
        ];
        if let Some(key) = &self.config.api_key {
            params.push(("key".to_string(), key.clone()));
        }

        debug!(url = %url, video_id = %id, "Fetching video details");

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    SearchError::Unreachable(e.to_string())
                } else {
                    SearchError::Request(e)
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let body: VideoListResponse = response.json().await.map_err(|e| {
                SearchError::ParseError(format!("Failed to parse video response: {}", e))
            })?;

            Ok(body
                .items
                .into_iter()
                .next()
                .map(|video| item_from_snippet(video.id, video.snippet)))
        } else if status.as_u16() == 404 {
            Ok(None)
        } else if status.as_u16() == 400 || status.as_u16() == 403 {
            let error_text = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                video_id = %id,
                error = %error_text,
                "Video lookup quota/auth failure"
            );
            Ok(None)
        } else if status.as_u16() == 401 {
            Err(SearchError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(SearchError::ApiError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Build the query-parameter list for a request from its category
    /// template (or the free-text query for `Search`).
    fn query_params(&self, request: &FeedRequest) -> Result<Vec<(String, String)>> {
        let mut params = vec![
            ("part".to_string(), "snippet".to_string()),
            ("type".to_string(), "video".to_string()),
            (
                "maxResults".to_string(),
                self.config.max_results.to_string(),
            ),
            ("regionCode".to_string(), self.config.region_code.clone()),
            (
                "relevanceLanguage".to_string(),
                self.config.language_hint.clone(),
            ),
        ];

        match QueryTemplate::for_category(request.category) {
            Some(template) => {
                params.push(("q".to_string(), template.keywords.to_string()));
                params.push(("order".to_string(), template.order.to_string()));
                params.push(("videoDuration".to_string(), template.duration.to_string()));
                if let Some(days) = template.published_within_days {
                    let cutoff = Utc::now() - ChronoDuration::days(days);
                    params.push((
                        "publishedAfter".to_string(),
                        cutoff.to_rfc3339_opts(SecondsFormat::Secs, true),
                    ));
                }
            }
            None => {
                let query = request.query.as_deref().unwrap_or_default();
                if query.is_empty() {
                    return Err(SearchError::ParseError(
                        "search request missing query text".into(),
                    ));
                }
                params.push(("q".to_string(), format!("{} #shorts", query)));
                params.push(("order".to_string(), "relevance".to_string()));
                params.push(("videoDuration".to_string(), "short".to_string()));
            }
        }

        if request.category == Category::Personalized {
            if self.config.access_token.is_none() {
                return Err(SearchError::AuthRequired);
            }
            params.push(("myRating".to_string(), "like".to_string()));
        }

        if let Some(key) = &self.config.api_key {
            params.push(("key".to_string(), key.clone()));
        }

        Ok(params)
    }
}

#[async_trait]
impl VideoCatalog for SearchClient {
    async fn search(
        &self,
        request: &FeedRequest,
    ) -> std::result::Result<Vec<ContentItem>, CoreError> {
        SearchClient::search(self, request).await.map_err(Into::into)
    }

    async fn video_details(
        &self,
        id: &VideoId,
    ) -> std::result::Result<Option<ContentItem>, CoreError> {
        SearchClient::video_details(self, id)
            .await
            .map_err(Into::into)
    }
}
