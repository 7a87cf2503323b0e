//! Experiment run tracking.
//!
//! Every training attempt opens a [`Run`], accumulates parameters, metrics
//! and logged model paths, and is appended to its experiment's run log when
//! it finishes, successfully or not.
//!
//! ## Core Types
//!
//! - [`Run`]: One training attempt and everything logged against it
//! - [`Tracker`]: Start/record contract used by the lifecycle manager
//! - [`Journal`]: JSON-lines run logs, one file per experiment
mod journal;
mod run;

pub use journal::*;
pub use run::*;
