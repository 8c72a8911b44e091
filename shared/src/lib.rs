//! Shared types for the Weather Prediction API
//!
//! Request schemas, forecast payloads, historical records and response
//! shapes used by the backend and its tests.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
