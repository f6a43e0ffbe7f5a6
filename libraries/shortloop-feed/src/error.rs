//! Error types for feed management

use shortloop_core::VideoId;
use thiserror::Error;

/// Feed errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// No item is currently selected
    #[error("No current item")]
    NoCurrentItem,

    /// The current item's listing carried no channel identifier;
    /// the host must resolve it via a metadata lookup first
    #[error("Channel unknown for video {0}")]
    UnknownChannel(VideoId),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;
