//! Rain classifier adapter
//!
//! No scaling is applied for this model; rows go to the classifier as-is.

use std::path::Path;

use crate::ml::{load_artifact, LogisticClassifier, ModelError, Predictor};

/// Raw outputs at or above this value mean rain
pub const RAIN_THRESHOLD: f64 = 0.5;

const RAIN_FEATURES: usize = 10;

#[derive(Debug, Clone)]
pub struct RainAdapter {
    model: LogisticClassifier,
}

impl RainAdapter {
    pub fn new(model: LogisticClassifier) -> Result<Self, ModelError> {
        if model.n_features() != RAIN_FEATURES {
            return Err(ModelError::FeatureCount {
                expected: RAIN_FEATURES,
                actual: model.n_features(),
            });
        }
        Ok(Self { model })
    }

    pub fn load(model_path: &Path) -> Result<Self, ModelError> {
        Self::new(load_artifact(model_path)?)
    }

    /// Raw model output for one row in `RAIN_COLUMNS` order
    pub fn predict(&self, features: [f64; 10]) -> Result<f64, ModelError> {
        self.model
            .predict(&[features.to_vec()])?
            .pop()
            .ok_or(ModelError::EmptyInput)
    }

    /// Whether the model calls for rain
    pub fn will_rain(&self, features: [f64; 10]) -> Result<bool, ModelError> {
        Ok(self.predict(features)? >= RAIN_THRESHOLD)
    }
}
