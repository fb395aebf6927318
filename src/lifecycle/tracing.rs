//! # Observability & Tracing
//!
//! [`setup_tracing`] installs one global `tracing` subscriber for the process.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: start (with toggle strategy), initial load, shutdown with final size
//! - **Mutations**: a `star`/`unstar`/`toggle_starred` span per client call, carrying `entity_ref`
//! - **Commits**: `Updated entity_ref=... starred=true size=3` once a change is saved
//! - **Failures**: save and reload errors at `warn`
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run     # Lifecycle and committed changes
//! RUST_LOG=debug cargo run    # Every request, including no-ops
//! ```
//!
//! The format hides the module path (`with_target(false)`) and renders spans
//! inline, e.g. `INFO star{entity_ref=component:default/a}: Updated ...`.

/// Initializes the tracing subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
