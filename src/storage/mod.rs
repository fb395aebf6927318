//! # Starred-Set Storage
//!
//! The actor keeps the starred set in memory and writes every change through a
//! [`StarredStorage`] backend before it announces the change. A backend only
//! has to load and save the whole set; the set is small (one user's bookmarks),
//! so there is no per-entry API.
//!
//! ## Backends
//!
//! - [`MemoryStorage`] - process-local, shareable between handles. Supports
//!   write-failure injection for tests.
//! - [`JsonFileStorage`] - a single JSON document on disk, replaced atomically.

pub mod error;
pub mod json_file;
pub mod memory;

pub use error::StorageError;
pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use std::collections::BTreeSet;

/// Name of the bucket the starred set lives in.
pub const STARRED_BUCKET: &str = "starredEntities";

/// Durable home of the starred set.
///
/// `save` must not return `Ok` until the set would survive a restart of the
/// backend; the actor relies on that to resolve `star`/`unstar` calls.
#[async_trait]
pub trait StarredStorage: Send + Sync {
    async fn load(&self) -> Result<BTreeSet<String>, StorageError>;

    async fn save(&self, starred: &BTreeSet<String>) -> Result<(), StorageError>;
}
