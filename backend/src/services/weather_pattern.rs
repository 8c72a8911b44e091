//! Weather pattern cluster adapter

use std::path::Path;

use crate::ml::{load_artifact, KMeans, ModelError, Predictor, Scaler};

const PATTERN_FEATURES: usize = 5;

#[derive(Debug, Clone)]
pub struct WeatherPatternAdapter {
    scaler: Scaler,
    model: KMeans,
}

impl WeatherPatternAdapter {
    pub fn new(scaler: Scaler, model: KMeans) -> Result<Self, ModelError> {
        for width in [scaler.n_features(), model.n_features()] {
            if width != PATTERN_FEATURES {
                return Err(ModelError::FeatureCount {
                    expected: PATTERN_FEATURES,
                    actual: width,
                });
            }
        }
        Ok(Self { scaler, model })
    }

    pub fn load(model_path: &Path, scaler_path: &Path) -> Result<Self, ModelError> {
        Self::new(load_artifact(scaler_path)?, load_artifact(model_path)?)
    }

    /// Cluster id for one row in `PATTERN_COLUMNS` order
    pub fn predict(&self, features: [f64; 5]) -> Result<usize, ModelError> {
        self.predict_batch(&[features])?
            .pop()
            .ok_or(ModelError::EmptyInput)
    }

    /// Cluster ids aligned positionally with `rows`
    pub fn predict_batch(&self, rows: &[[f64; 5]]) -> Result<Vec<usize>, ModelError> {
        let rows: Vec<Vec<f64>> = rows.iter().map(|row| row.to_vec()).collect();
        let scaled = self.scaler.transform(&rows)?;
        self.model.predict(&scaled)
    }
}
