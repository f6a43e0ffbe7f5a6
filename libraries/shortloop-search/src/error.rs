//! Error types for the search and identity clients.

use shortloop_core::CoreError;
use thiserror::Error;

/// Errors that can occur when talking to the remote video platform.
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned an error response
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// A bearer credential is required but missing or expired
    #[error("Authentication required")]
    AuthRequired,

    /// The account authenticated but is not on the allow-list
    #[error("Account not authorized: {0}")]
    AuthRejected(String),

    /// Invalid API base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse an API response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The API host is offline or unreachable
    #[error("API unreachable: {0}")]
    Unreachable(String),
}

impl From<SearchError> for CoreError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::AuthRejected(email) => CoreError::AuthRejected(email),
            other => CoreError::Search(other.to_string()),
        }
    }
}

/// Result type for search client operations.
pub type Result<T> = std::result::Result<T, SearchError>;
