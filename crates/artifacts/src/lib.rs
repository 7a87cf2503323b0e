//! Model artifacts on disk.
//!
//! A fitted forest is written together with the metadata needed to serve it
//! again after a restart: its feature schema, held-out accuracy, training
//! time, and the experiment run that produced it.
//!
//! ## Core Types
//!
//! - [`Artifact`]: Fitted model plus provenance
//! - [`Store`]: Save/load contract used by the lifecycle manager
//! - [`Directory`]: JSON files under a single models directory
mod artifact;
mod directory;

pub use artifact::*;
pub use directory::*;
