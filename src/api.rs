//! # The Starred-Entities API
//!
//! [`StarredEntitiesApi`] is the contract UI code programs against. Consumers
//! receive an `Arc<dyn StarredEntitiesApi>` (directly or through
//! [`ApiRegistry`](crate::lifecycle::ApiRegistry) under
//! [`STARRED_ENTITIES_API_REF`](crate::api_ref::STARRED_ENTITIES_API_REF)) and
//! never see which backend sits behind it.
//!
//! ## Semantics
//!
//! - **star / unstar** resolve once the change is durably recorded and fail with
//!   [`StarredError`] otherwise. Both are idempotent: repeating them is a
//!   successful no-op.
//! - **toggle_starred** is `unstar` if the entity is starred and `star` otherwise,
//!   decided and applied as one operation.
//! - **starred_entities** returns a live [`StarredEntitiesStream`]. The first
//!   snapshot is the current state; after that one snapshot per change. Once a
//!   mutation has resolved, every subscriber eventually observes it.
//!
//! Per entity the state machine is just `unstarred <-> starred`.

use crate::model::EntityRef;
use crate::observe::StarredEntitiesStream;
use crate::starred_actor::StarredError;
use async_trait::async_trait;

/// An API to store and retrieve starred entities.
#[async_trait]
pub trait StarredEntitiesApi: Send + Sync {
    /// Toggle the star state of the entity.
    async fn toggle_starred(&self, entity_ref: &EntityRef) -> Result<(), StarredError>;

    /// Star the entity.
    async fn star(&self, entity_ref: &EntityRef) -> Result<(), StarredError>;

    /// Unstar the entity.
    async fn unstar(&self, entity_ref: &EntityRef) -> Result<(), StarredError>;

    /// Observe the starred set. Each subscriber receives the current snapshot first.
    fn starred_entities(&self) -> StarredEntitiesStream;

    /// Whether the entity is starred in the latest published snapshot.
    fn is_starred(&self, entity_ref: &EntityRef) -> bool {
        self.starred_entities().current().contains(entity_ref)
    }
}
