//! Fitted feature scalers

use serde::{Deserialize, Serialize};

use super::{check_finite, check_row, Artifact, ModelError};

/// A fitted per-column scaler
///
/// `standard`: x' = (x - mean) / scale
/// `min_max`:  x' = x * scale + min
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl Scaler {
    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { scale, .. } | Scaler::MinMax { scale, .. } => scale.len(),
        }
    }

    /// Map raw rows into model space
    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ModelError> {
        self.apply(rows, |offset, scale, x| match self {
            Scaler::Standard { .. } => (x - offset) / scale,
            Scaler::MinMax { .. } => x * scale + offset,
        })
    }

    /// Map model-space rows back into raw units
    pub fn inverse_transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ModelError> {
        self.apply(rows, |offset, scale, x| match self {
            Scaler::Standard { .. } => x * scale + offset,
            Scaler::MinMax { .. } => (x - offset) / scale,
        })
    }

    fn params(&self) -> (&[f64], &[f64]) {
        match self {
            Scaler::Standard { mean, scale } => (mean, scale),
            Scaler::MinMax { min, scale } => (min, scale),
        }
    }

    fn apply<F>(&self, rows: &[Vec<f64>], f: F) -> Result<Vec<Vec<f64>>, ModelError>
    where
        F: Fn(f64, f64, f64) -> f64,
    {
        let (offsets, scales) = self.params();
        rows.iter()
            .map(|row| {
                check_row(row, self.n_features())?;
                Ok(row
                    .iter()
                    .zip(offsets.iter().zip(scales))
                    .map(|(&x, (&offset, &scale))| f(offset, scale, x))
                    .collect())
            })
            .collect()
    }
}

impl Artifact for Scaler {
    fn check(&self) -> Result<(), ModelError> {
        let (offsets, scales) = self.params();
        if scales.is_empty() {
            return Err(ModelError::InvalidArtifact("scaler has no columns".into()));
        }
        if offsets.len() != scales.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "scaler offsets have {} columns, scales have {}",
                offsets.len(),
                scales.len()
            )));
        }
        check_finite(offsets, "scaler offsets")?;
        check_finite(scales, "scaler scales")?;
        if scales.iter().any(|s| *s == 0.0) {
            return Err(ModelError::InvalidArtifact("scaler has a zero scale".into()));
        }
        Ok(())
    }
}
