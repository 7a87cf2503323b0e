//! Tabular classification for the model service.
//!
//! Thin adapters over aprender: the service keeps its own row-oriented
//! [`Dataset`] and [`Classifier`] contract, and delegates splitting,
//! fitting and scoring to the library.
//!
//! ## Core Types
//!
//! - [`Dataset`]: Named feature matrix with integer labels and seeded splitting
//! - [`Forest`]: aprender's random forest behind the [`Classifier`] contract
//! - [`Classifier`]: The contract the lifecycle manager consumes
mod classifier;
mod dataset;
mod forest;

pub use classifier::*;
pub use dataset::*;
pub use forest::*;

pub use aprender::metrics::classification::accuracy;
