//! Record store error types.

use crate::domain::ValidationError;

/// Errors that can occur when reading from or writing to the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store returned an error status
    #[error("record store error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response or file
    #[error("JSON parse error in {collection}: {message}")]
    Json { collection: String, message: String },

    /// Reading or writing a local collection file failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Collection name contains characters the store does not allow
    #[error("invalid collection name: {0:?}")]
    InvalidCollection(String),

    /// A blocking store task panicked or was cancelled
    #[error("record store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Records were fetched but do not describe a valid timetable
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] ValidationError),
}
