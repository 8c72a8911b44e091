//! Domain models for the Weather Prediction API

mod forecast;
mod history;
mod inputs;

pub use forecast::*;
pub use history::*;
pub use inputs::*;
