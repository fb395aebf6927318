//! Error types for storage backends.

use thiserror::Error;

/// Errors a [`StarredStorage`](super::StarredStorage) backend can report.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend is temporarily or permanently unable to serve requests.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
