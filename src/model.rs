//! Binary classification
//!
//! This module defines the classifier seam of the pipeline and the shipped
//! logistic-regression implementation. The model weights are an external
//! artifact produced by an out-of-scope training pipeline; inference is a
//! dot product, an intercept, and a sigmoid.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScreenError;
use crate::types::{Prediction, RiskLabel, FEATURE_COUNT};

/// Decision threshold on the positive-class probability
pub const DECISION_THRESHOLD: f64 = 0.5;

/// A binary probabilistic classifier over the scaled feature vector.
///
/// Implementations must be deterministic: the same input vector always yields
/// the same label and probability. The trait is the seam for substituting a
/// stub classifier in tests.
pub trait Classifier {
    fn predict(&self, scaled: &[f64; FEATURE_COUNT]) -> Prediction;
}

/// Fitted logistic-regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ModelArtifact")]
pub struct LogisticModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

/// On-disk shape of the classifier artifact
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl TryFrom<ModelArtifact> for LogisticModel {
    type Error = ScreenError;

    fn try_from(artifact: ModelArtifact) -> Result<Self, ScreenError> {
        LogisticModel::new(artifact.coefficients, artifact.intercept)
    }
}

impl LogisticModel {
    /// Build a model from per-feature coefficients and an intercept.
    ///
    /// Fails if the coefficient vector is not exactly [`FEATURE_COUNT`] wide
    /// or any weight is non-finite.
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ScreenError> {
        if coefficients.len() != FEATURE_COUNT {
            return Err(ScreenError::DimensionMismatch {
                expected: FEATURE_COUNT,
                found: coefficients.len(),
            });
        }
        if let Some(c) = coefficients.iter().find(|c| !c.is_finite()) {
            return Err(ScreenError::InvalidArtifact(format!(
                "non-finite model coefficient: {c}"
            )));
        }
        if !intercept.is_finite() {
            return Err(ScreenError::InvalidArtifact(format!(
                "non-finite model intercept: {intercept}"
            )));
        }

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    /// Load the model from its JSON artifact text
    pub fn from_json(json: &str) -> Result<Self, ScreenError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the model from a JSON artifact file
    pub fn from_file(path: &Path) -> Result<Self, ScreenError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Linear score before the sigmoid link
    fn decision_function(&self, scaled: &[f64; FEATURE_COUNT]) -> f64 {
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(scaled.iter())
            .map(|(w, x)| w * x)
            .sum();
        dot + self.intercept
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, scaled: &[f64; FEATURE_COUNT]) -> Prediction {
        let probability = sigmoid(self.decision_function(scaled));
        let label = if probability >= DECISION_THRESHOLD {
            RiskLabel::Suspected
        } else {
            RiskLabel::NotSuspected
        };

        Prediction { label, probability }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_midpoint() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(10.0) > 0.999);
        assert!(sigmoid(-10.0) < 0.001);
    }

    #[test]
    fn test_predict_labels() {
        // Single positive weight on the glucose slot, the rest zero
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[1] = 2.0;
        let model = LogisticModel::new(coefficients, 0.0).expect("Valid model");

        let mut high = [0.0; FEATURE_COUNT];
        high[1] = 3.0;
        let positive = model.predict(&high);
        assert_eq!(positive.label, RiskLabel::Suspected);
        assert!(positive.probability > 0.99);

        let mut low = [0.0; FEATURE_COUNT];
        low[1] = -3.0;
        let negative = model.predict(&low);
        assert_eq!(negative.label, RiskLabel::NotSuspected);
        assert!(negative.probability < 0.01);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let model =
            LogisticModel::new(vec![0.4, 1.1, -0.2, 0.05, -0.1, 0.7, 0.3, 0.2], -0.85)
                .expect("Valid model");
        let scaled = [0.1, 0.9, 0.0, 0.6, 1.0, 0.4, 0.1, 1.4];

        let first = model.predict(&scaled);
        let second = model.predict(&scaled);
        assert_eq!(first, second);
        assert!((0.0..=1.0).contains(&first.probability));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let result = LogisticModel::new(vec![1.0; 9], 0.0);
        assert!(matches!(
            result,
            Err(ScreenError::DimensionMismatch {
                expected: FEATURE_COUNT,
                found: 9
            })
        ));
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[2] = f64::NAN;
        assert!(matches!(
            LogisticModel::new(coefficients, 0.0),
            Err(ScreenError::InvalidArtifact(_))
        ));
        assert!(matches!(
            LogisticModel::new(vec![0.0; FEATURE_COUNT], f64::INFINITY),
            Err(ScreenError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "coefficients": [0.4, 1.1, -0.2, 0.05, -0.1, 0.7, 0.3, 0.2],
            "intercept": -0.85
        }"#;

        let model = LogisticModel::from_json(json).expect("Valid artifact");
        let prediction = model.predict(&[0.0; FEATURE_COUNT]);
        // Intercept alone: sigmoid(-0.85) < 0.5
        assert_eq!(prediction.label, RiskLabel::NotSuspected);
    }
}
