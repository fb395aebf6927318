//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the starred-entities actor.
//!
//! **Key Responsibilities:**
//! 1. **Actor Creation** - [`StarredSystem::new`] builds the actor and its client
//! 2. **Dependency Injection** - storage goes into `run(storage)`; the client goes into an [`ApiRegistry`]
//! 3. **Graceful Shutdown** - drop clients, await the actor task
//! 4. **Observability Setup** - [`setup_tracing`]
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the request channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Actor logs final state** and returns
//! 4. **Await completion** - [`StarredSystem::shutdown`] joins the task
//!
//! Requests already queued are still answered before the actor exits.

pub mod registry;
pub mod starred_system;
pub mod tracing;

pub use registry::*;
pub use starred_system::*;
pub use self::tracing::setup_tracing;
