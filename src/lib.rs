//! In-process model lifecycle service.
//!
//! This facade crate re-exports all public mlserve crates for convenient access.
//!
//! ## Crate Organization
//!
//! ### Core Types
//! - [`core`]: type aliases, identifiers and service constants
//! - [`forest`]: datasets and the random forest classifier
//! - [`drift`]: two-sample drift statistics and reports
//!
//! ### Infrastructure
//! - [`artifacts`]: model artifact persistence
//! - [`tracking`]: experiment run journal
//! - [`dto`]: API request/response types
//!
//! ### Application
//! - [`lifecycle`]: the model manager and its snapshot
//! - [`server`]: actix-web routes and bootstrap

pub use mls_core      as core;
pub use mls_forest    as forest;
pub use mls_drift     as drift;
pub use mls_artifacts as artifacts;
pub use mls_tracking  as tracking;
pub use mls_dto       as dto;
pub use mls_lifecycle as lifecycle;
pub use mls_server    as server;

// Re-export commonly used types at the root
pub use mls_core::*;
