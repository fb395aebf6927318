//! # Actor Messages
//!
//! Requests sent from a [`StarredEntitiesClient`](crate::clients::StarredEntitiesClient)
//! to the [`StarredActor`](super::StarredActor). Every request carries a oneshot
//! responder that the actor answers exactly once.

use super::error::StarredError;
use crate::model::EntityRef;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, StarredError>>;

/// Internal message type sent to the actor.
///
/// Mutations resolve with `Ok(())` once the resulting set is saved, or
/// immediately if the set would not change.
#[derive(Debug)]
pub enum StarredRequest {
    Star {
        entity_ref: EntityRef,
        respond_to: Response<()>,
    },
    Unstar {
        entity_ref: EntityRef,
        respond_to: Response<()>,
    },
    Toggle {
        entity_ref: EntityRef,
        respond_to: Response<()>,
    },
    /// Reload the set from storage and publish it if it changed.
    Refresh { respond_to: Response<()> },
}

impl StarredRequest {
    /// Short operation name, for logs.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Star { .. } => "star",
            Self::Unstar { .. } => "unstar",
            Self::Toggle { .. } => "toggle",
            Self::Refresh { .. } => "refresh",
        }
    }
}
