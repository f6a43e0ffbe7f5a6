//! Unified error type for collaborator boundaries

use thiserror::Error;

/// Errors surfaced through the core collaborator traits.
///
/// Concrete implementations (HTTP client, redb store) carry richer error
/// enums of their own and convert into `CoreError` at the trait boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The content-search collaborator failed (network, quota, parse)
    #[error("search failed: {0}")]
    Search(String),

    /// The identity collaborator rejected the account
    #[error("account not authorized: {0}")]
    AuthRejected(String),

    /// The preference store failed to read or write
    #[error("preference store error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;
