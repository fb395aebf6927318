//! # Starred Entities
//!
//! > **Track which catalog entities a user has starred, and watch that set change.**
//!
//! This crate defines the starred-entities API of a catalog plugin system and
//! ships an actor-backed implementation of it on Tokio.
//!
//! ## 🏗️ Design
//!
//! The API ([`StarredEntitiesApi`]) is a small contract: `star`, `unstar`,
//! `toggle_starred`, and a live stream of snapshots. Consumers hold an
//! `Arc<dyn StarredEntitiesApi>` and never learn what backs it.
//!
//! The default backend is a single [`StarredActor`](starred_actor::StarredActor)
//! that owns the starred set. It processes requests one at a time (no locks),
//! writes every change through a [`StarredStorage`](storage::StarredStorage)
//! backend, and publishes a snapshot only once the write has succeeded.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Contract ([`api`], [`api_ref`], [`observe`])
//! - **Role**: What consumers program against.
//! - **Key items**: [`StarredEntitiesApi`], [`STARRED_ENTITIES_API_REF`],
//!   [`StarredEntitiesStream`](observe::StarredEntitiesStream).
//!
//! ### 2. The Model ([`model`])
//! - **Role**: Entities, their canonical [`EntityRef`](model::EntityRef) strings,
//!   and the [`StarredEntitiesSnapshot`](model::StarredEntitiesSnapshot).
//!
//! ### 3. The Engine ([`starred_actor`], [`storage`])
//! - **Role**: The actor and the durable home of the set.
//!
//! ### 4. The Interface ([`clients`])
//! - **Role**: [`StarredEntitiesClient`](clients::StarredEntitiesClient) turns API calls into actor messages.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! - **Role**: Spins the actor up, registers it, shuts it down; reads settings from the environment.
//!
//! ### 6. Test Doubles ([`mock`])
//! - **Role**: An in-memory API and request-level helpers.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use starred_entities::{StarredEntitiesApi, STARRED_ENTITIES_API_REF};
//! use starred_entities::config::StarredConfig;
//! use starred_entities::lifecycle::StarredSystem;
//! use starred_entities::model::Entity;
//!
//! #[tokio::main]
//! async fn main() {
//!     let system = StarredSystem::from_config(&StarredConfig::default());
//!     let registry = system.registry().unwrap();
//!     let api = registry.require(STARRED_ENTITIES_API_REF).unwrap();
//!
//!     let entity = Entity::new("Component", "checkout");
//!     let mut stream = api.starred_entities();
//!     assert!(!stream.next().await.unwrap().is_starred(&entity));
//!
//!     api.star(&entity.entity_ref().unwrap()).await.unwrap();
//!     assert!(stream.next().await.unwrap().is_starred(&entity));
//!
//!     drop((api, registry));
//!     system.shutdown().await.unwrap();
//! }
//! ```
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod api;
pub mod api_ref;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod mock;
pub mod model;
pub mod observe;
pub mod starred_actor;
pub mod storage;

pub use api::StarredEntitiesApi;
pub use api_ref::{ApiRef, STARRED_ENTITIES_API_REF};
pub use starred_actor::StarredError;
