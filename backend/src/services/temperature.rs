//! Temperature regression adapter
//!
//! The scaler was fit on the five input columns plus the target column, so
//! a prediction goes: scale all six, drop the scaled placeholder, regress,
//! then put the prediction back in the target slot and inverse-transform.

use std::path::Path;

use crate::ml::{load_artifact, LinearRegressor, ModelError, Predictor, Scaler};

#[derive(Debug, Clone)]
pub struct TemperatureAdapter {
    scaler: Scaler,
    model: LinearRegressor,
}

impl TemperatureAdapter {
    pub fn new(scaler: Scaler, model: LinearRegressor) -> Result<Self, ModelError> {
        if scaler.n_features() != model.n_features() + 1 {
            return Err(ModelError::InvalidArtifact(format!(
                "temperature scaler has {} columns, regressor expects {} plus the target",
                scaler.n_features(),
                model.n_features()
            )));
        }
        Ok(Self { scaler, model })
    }

    pub fn load(model_path: &Path, scaler_path: &Path) -> Result<Self, ModelError> {
        Self::new(load_artifact(scaler_path)?, load_artifact(model_path)?)
    }

    /// Predict tomorrow's temperature in Celsius.
    ///
    /// `features` is `[sealevelpressure, evaporation, humidity, dew, temp, temp_proxy]`.
    pub fn predict(&self, features: [f64; 6]) -> Result<f64, ModelError> {
        let mut scaled = self
            .scaler
            .transform(&[features.to_vec()])?
            .pop()
            .ok_or(ModelError::EmptyInput)?;
        scaled.pop();

        let predicted = self
            .model
            .predict(&[scaled.clone()])?
            .pop()
            .ok_or(ModelError::EmptyInput)?;
        scaled.push(predicted);

        let restored = self
            .scaler
            .inverse_transform(&[scaled])?
            .pop()
            .and_then(|row| row.last().copied())
            .ok_or(ModelError::EmptyInput)?;

        if !restored.is_finite() {
            return Err(ModelError::NonFinite("temperature prediction"));
        }
        Ok(restored)
    }
}
