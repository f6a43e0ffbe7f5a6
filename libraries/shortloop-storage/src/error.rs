//! Storage-specific errors

use shortloop_core::CoreError;
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Preference store error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open or create the database file
    #[error("Database open error: {0}")]
    Open(#[from] redb::DatabaseError),

    /// Failed to begin a transaction
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Failed to open a table
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Low-level storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    /// Failed to commit a write transaction
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(io) => CoreError::Io(io),
            other => CoreError::Storage(other.to_string()),
        }
    }
}
