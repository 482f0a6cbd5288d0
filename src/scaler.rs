//! Feature scaling
//!
//! This module applies the pre-fitted standardization transform to raw
//! feature vectors: per-feature subtract-mean, divide-by-scale. The transform
//! parameters are an external artifact produced at training time; no fitting
//! happens at request time.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScreenError;
use crate::types::FEATURE_COUNT;

/// Fitted affine transform over the 8-feature input vector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ScalerArtifact")]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// On-disk shape of the scaler artifact
#[derive(Debug, Deserialize)]
struct ScalerArtifact {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl TryFrom<ScalerArtifact> for StandardScaler {
    type Error = ScreenError;

    fn try_from(artifact: ScalerArtifact) -> Result<Self, ScreenError> {
        StandardScaler::new(artifact.mean, artifact.scale)
    }
}

impl StandardScaler {
    /// Build a scaler from per-feature means and scales.
    ///
    /// Fails if either vector is not exactly [`FEATURE_COUNT`] wide, or if
    /// any scale entry is zero or non-finite.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ScreenError> {
        if mean.len() != FEATURE_COUNT {
            return Err(ScreenError::DimensionMismatch {
                expected: FEATURE_COUNT,
                found: mean.len(),
            });
        }
        if scale.len() != FEATURE_COUNT {
            return Err(ScreenError::DimensionMismatch {
                expected: FEATURE_COUNT,
                found: scale.len(),
            });
        }
        if let Some(m) = mean.iter().find(|m| !m.is_finite()) {
            return Err(ScreenError::InvalidArtifact(format!(
                "non-finite scaler mean entry: {m}"
            )));
        }
        if let Some(s) = scale.iter().find(|s| !s.is_finite() || **s == 0.0) {
            return Err(ScreenError::InvalidArtifact(format!(
                "scaler scale entry must be finite and non-zero, got {s}"
            )));
        }

        Ok(Self { mean, scale })
    }

    /// Load the scaler from its JSON artifact text
    pub fn from_json(json: &str) -> Result<Self, ScreenError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the scaler from a JSON artifact file
    pub fn from_file(path: &Path) -> Result<Self, ScreenError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Apply the transform: `(x - mean) / scale` per feature
    pub fn transform(&self, raw: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut scaled = [0.0; FEATURE_COUNT];
        for (i, x) in raw.iter().enumerate() {
            scaled[i] = (x - self.mean[i]) / self.scale[i];
        }
        scaled
    }
}
