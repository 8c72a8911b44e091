//! HTTP handlers for the Weather Prediction API

pub mod health;
pub mod prediction;
pub mod visualization;

pub use health::*;
pub use prediction::*;
pub use visualization::*;
