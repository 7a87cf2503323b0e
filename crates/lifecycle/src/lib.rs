//! Model lifecycle management.
//!
//! The [`Manager`] owns the one piece of shared mutable state in the service:
//! the currently served model, the training rows kept as a drift baseline,
//! and the metrics of the run that produced them. Those three travel
//! together in an immutable [`Snapshot`] and are only ever replaced whole.
//!
//! ## Operations
//!
//! - `train`: fit, evaluate, persist, track, then swap the snapshot in
//! - `predict`: single-row inference against the current snapshot
//! - `describe`: public summary of the current snapshot
//! - `drift`: compare a current dataset with the training baseline
//!
//! ## Collaborators
//!
//! Data comes from a [`Source`]; artifacts go to an [`mls_artifacts::Store`];
//! runs go to an [`mls_tracking::Tracker`]; drift is judged by an
//! [`mls_drift::Analyser`]. All four are injected, so tests can swap any of
//! them out.
mod failure;
mod manager;
mod snapshot;
mod source;
mod telemetry;

pub use failure::*;
pub use manager::*;
pub use snapshot::*;
pub use source::*;
pub use telemetry::*;
