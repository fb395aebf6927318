//! # Starred Entities Actor
//!
//! The default, actor-backed implementation of
//! [`StarredEntitiesApi`](crate::api::StarredEntitiesApi).
//!
//! ## Structure
//!
//! - [`actor`] - [`StarredActor`], the sequential owner of the starred set
//! - [`message`] - [`StarredRequest`] sent by clients
//! - [`error`] - [`StarredError`] returned by every mutation
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Key Features
//!
//! - **No locks**: the set lives inside one task
//! - **Write-through**: a change is visible to observers only after it is saved
//! - **Late binding**: storage is handed to [`StarredActor::run`], not to `new`

pub mod actor;
pub mod error;
pub mod message;

pub use actor::StarredActor;
pub use error::StarredError;
pub use message::{Response, StarredRequest};

use crate::clients::StarredEntitiesClient;
use crate::config::StarredConfig;

/// Creates a new starred-entities actor and its client.
pub fn new(config: &StarredConfig) -> (StarredActor, StarredEntitiesClient) {
    StarredActor::new(config)
}
