//! Data transfer objects for API communication.
//!
//! Request and response types for the model service, serializable via `serde`.
//! Requests carry their own schema checks: [`Validate`] rejects out-of-range
//! fields before anything touches model state.
mod request;
mod response;
mod validate;

pub use request::*;
pub use response::*;
pub use validate::*;
