//! Linear models: temperature regressor and rain classifier

use serde::{Deserialize, Serialize};

use super::{check_finite, dot, Artifact, ModelError, Predictor};

/// Ordinary least squares regressor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl Predictor for LinearRegressor {
    type Output = f64;

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        dot(&self.coefficients, row) + self.intercept
    }
}

impl Artifact for LinearRegressor {
    fn check(&self) -> Result<(), ModelError> {
        if self.coefficients.is_empty() {
            return Err(ModelError::InvalidArtifact("regressor has no coefficients".into()));
        }
        check_finite(&self.coefficients, "regressor coefficients")?;
        check_finite(&[self.intercept], "regressor intercept")
    }
}

fn default_threshold() -> f64 {
    0.5
}

/// Binary logistic classifier emitting hard labels (0.0 or 1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticClassifier {
    fn probability(&self, row: &[f64]) -> f64 {
        let z = dot(&self.coefficients, row) + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }
}

impl Predictor for LogisticClassifier {
    type Output = f64;

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        if self.probability(row) >= self.threshold {
            1.0
        } else {
            0.0
        }
    }
}

impl Artifact for LogisticClassifier {
    fn check(&self) -> Result<(), ModelError> {
        if self.coefficients.is_empty() {
            return Err(ModelError::InvalidArtifact("classifier has no coefficients".into()));
        }
        check_finite(&self.coefficients, "classifier coefficients")?;
        check_finite(&[self.intercept], "classifier intercept")?;
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ModelError::InvalidArtifact(format!(
                "classifier threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }
}
