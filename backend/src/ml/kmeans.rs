//! Nearest-centroid cluster assignment

use serde::{Deserialize, Serialize};

use super::{check_finite, Artifact, ModelError, Predictor};

/// Fitted k-means model; the cluster id is the centroid index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeans {
    pub centroids: Vec<Vec<f64>>,
}

impl Predictor for KMeans {
    type Output = usize;

    fn n_features(&self) -> usize {
        self.centroids.first().map_or(0, Vec::len)
    }

    // Ties go to the lowest index.
    fn predict_row(&self, row: &[f64]) -> usize {
        let mut best = (0, f64::INFINITY);
        for (index, centroid) in self.centroids.iter().enumerate() {
            let distance: f64 = centroid
                .iter()
                .zip(row)
                .map(|(c, x)| (c - x) * (c - x))
                .sum();
            if distance < best.1 {
                best = (index, distance);
            }
        }
        best.0
    }
}

impl Artifact for KMeans {
    fn check(&self) -> Result<(), ModelError> {
        let width = self.n_features();
        if width == 0 {
            return Err(ModelError::InvalidArtifact("k-means has no centroids".into()));
        }
        for centroid in &self.centroids {
            if centroid.len() != width {
                return Err(ModelError::InvalidArtifact(format!(
                    "centroid width {} differs from {}",
                    centroid.len(),
                    width
                )));
            }
            check_finite(centroid, "centroid")?;
        }
        Ok(())
    }
}
