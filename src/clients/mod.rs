//! Client handles for the starred-entities actor.

pub mod starred_client;

pub use starred_client::*;
