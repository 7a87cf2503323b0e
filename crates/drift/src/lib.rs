//! Data drift analysis.
//!
//! Compares a current dataset against a reference snapshot column by column
//! and summarises the result in a serializable [`DriftReport`].
//!
//! ## Core Types
//!
//! - [`Analyser`]: The `compare(reference, current)` contract
//! - [`Suite`]: Default analyser: KS test, PSI, and Wasserstein distance per feature
//! - [`DriftReport`]: Per-feature results plus a dataset-level verdict
//!
//! ## Statistics
//!
//! The [`stats`] functions work on plain slices and are usable on their own.
mod report;
pub mod stats;
mod suite;

pub use report::*;
pub use suite::*;
