//! Artifact loading

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::ModelError;

/// A deserialized artifact that can check its own parameters
pub trait Artifact: DeserializeOwned {
    fn check(&self) -> Result<(), ModelError>;
}

/// Read, parse and check one JSON artifact
pub fn load_artifact<T: Artifact>(path: &Path) -> Result<T, ModelError> {
    let load_error = |reason: String| ModelError::Load {
        path: path.to_path_buf(),
        reason,
    };

    let raw = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    let artifact: T = serde_json::from_str(&raw).map_err(|e| load_error(e.to_string()))?;
    artifact.check().map_err(|e| load_error(e.to_string()))?;

    tracing::debug!("Loaded artifact {}", path.display());
    Ok(artifact)
}
