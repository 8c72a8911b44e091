//! Pre-trained model artifacts
//!
//! Trained parameters are exported to JSON and loaded once at startup.
//! Every model exposes the same [`Predictor`] capability over fixed-width
//! feature rows; scalers map between raw units and model space.

pub mod artifact;
pub mod kmeans;
pub mod linear;
pub mod scaler;

pub use artifact::{load_artifact, Artifact};
pub use kmeans::KMeans;
pub use linear::{LinearRegressor, LogisticClassifier};
pub use scaler::Scaler;

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or evaluating a model artifact
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to load artifact {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("Expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("No rows to predict")]
    EmptyInput,

    #[error("Non-finite value in {0}")]
    NonFinite(&'static str),
}

/// A fitted model evaluated row by row
pub trait Predictor {
    type Output;

    /// Width of the rows the model was fit with
    fn n_features(&self) -> usize;

    /// Evaluate one row already checked for width
    fn predict_row(&self, row: &[f64]) -> Self::Output;

    /// Evaluate a batch; output is aligned with `rows`
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<Self::Output>, ModelError> {
        if rows.is_empty() {
            return Err(ModelError::EmptyInput);
        }
        rows.iter()
            .map(|row| {
                check_row(row, self.n_features())?;
                Ok(self.predict_row(row))
            })
            .collect()
    }
}

/// Reject rows of the wrong width or carrying NaN/inf
pub(crate) fn check_row(row: &[f64], expected: usize) -> Result<(), ModelError> {
    if row.len() != expected {
        return Err(ModelError::FeatureCount {
            expected,
            actual: row.len(),
        });
    }
    if row.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::NonFinite("input row"));
    }
    Ok(())
}

pub(crate) fn check_finite(values: &[f64], what: &'static str) -> Result<(), ModelError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ModelError::NonFinite(what))
    }
}

pub(crate) fn dot(weights: &[f64], row: &[f64]) -> f64 {
    weights.iter().zip(row).map(|(w, x)| w * x).sum()
}
