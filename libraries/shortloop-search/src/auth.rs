//! Identity collaborator: profile lookup and account allow-listing.

use crate::error::{Result, SearchError};
use crate::types::UserProfile;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Client for the identity provider's profile endpoint.
///
/// The interactive consent flow happens in the embedding shell; this client
/// takes the bearer credential that flow produced, fetches the basic profile
/// and enforces the account allow-list. An empty allow-list admits everyone.
pub struct IdentityClient {
    http: Client,
    base_url: String,
    allowed_emails: Vec<String>,
}

impl IdentityClient {
    /// Create a client for the given identity endpoint.
    pub fn new(base_url: impl Into<String>, allowed_emails: Vec<String>) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(SearchError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
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

        let allowed_emails = allowed_emails
            .into_iter()
            .map(|email| email.trim().to_lowercase())
            .collect();

        Ok(Self {
            http,
            base_url,
            allowed_emails,
        })
    }

    /// Fetch the bearer profile and enforce the allow-list.
    ///
    /// A profile whose email is not allow-listed yields
    /// [`SearchError::AuthRejected`]; the caller must not create a session.
    pub async fn authorize(&self, access_token: &str) -> Result<UserProfile> {
        let profile = self.profile(access_token).await?;

        if !self.is_allowed(&profile.email) {
            warn!(email = %profile.email, "Account not on the allow-list");
            return Err(SearchError::AuthRejected(profile.email));
        }

        info!(
            email = %profile.email,
            name = profile.name.as_deref().unwrap_or("<unknown>"),
            "Account authorized"
        );
        Ok(profile)
    }

    /// Fetch the basic profile for a bearer credential.
    pub async fn profile(&self, access_token: &str) -> Result<UserProfile> {
        let url = format!("{}/userinfo", self.base_url);
        debug!(url = %url, "Fetching identity profile");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
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
            let profile: UserProfile = response.json().await.map_err(|e| {
                SearchError::ParseError(format!("Failed to parse profile response: {}", e))
            })?;
            Ok(profile)
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(SearchError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(SearchError::ApiError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    fn is_allowed(&self, email: &str) -> bool {
        self.allowed_emails.is_empty()
            || self
                .allowed_emails
                .iter()
                .any(|allowed| allowed == &email.trim().to_lowercase())
    }
}
