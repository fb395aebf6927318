//! # Domain Model
//!
//! Plain data types shared by every layer: entities, their references, and the
//! snapshot handed to observers.

pub mod entity;
pub mod snapshot;

pub use entity::{Entity, EntityMetadata, EntityRef, EntityRefError, DEFAULT_NAMESPACE};
pub use snapshot::StarredEntitiesSnapshot;
