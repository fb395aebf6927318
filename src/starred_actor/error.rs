//! Error types for starred-entities operations.

use crate::storage::StorageError;
use thiserror::Error;

/// Errors returned by [`StarredEntitiesApi`](crate::api::StarredEntitiesApi) mutations.
#[derive(Debug, Error)]
pub enum StarredError {
    /// The actor is no longer running; the request was never delivered.
    #[error("Starred entities actor closed")]
    ActorClosed,

    /// The actor accepted the request but dropped it without answering.
    #[error("Starred entities actor dropped response channel")]
    ActorDropped,

    /// The change could not be durably recorded.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
