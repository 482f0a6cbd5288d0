//! Pipeline orchestration
//!
//! This module wires the stages together: gate on submission age, scale the
//! feature vector, classify, explain, and encode the report. The engine is
//! immutable once constructed, so shared read-only use across sessions is
//! safe.

use std::path::Path;

use crate::error::ScreenError;
use crate::explain::ExplanationEngine;
use crate::model::{Classifier, LogisticModel};
use crate::report::ReportEncoder;
use crate::scaler::StandardScaler;
use crate::types::{PatientSample, ScreeningReport};

/// File name of the scaler artifact inside the model directory
pub const SCALER_FILE: &str = "scaler.json";

/// File name of the classifier artifact inside the model directory
pub const CLASSIFIER_FILE: &str = "classifier.json";

/// Submissions at or below this age produce no report.
///
/// This mirrors the original form's behavior verbatim: such a submission is
/// accepted and silently ignored, it is not a validation error.
pub const AGE_GATE_YEARS: u32 = 10;

/// Screening engine holding the fitted scaler and classifier.
///
/// Both artifacts are loaded once at construction and never mutated; a
/// loading failure is fatal and no engine is produced. The classifier is
/// generic so tests can inject a stub with a fixed label and probability.
pub struct ScreenEngine<C: Classifier = LogisticModel> {
    scaler: StandardScaler,
    classifier: C,
    encoder: ReportEncoder,
}

impl<C: Classifier> ScreenEngine<C> {
    /// Create an engine from already-loaded artifacts
    pub fn new(scaler: StandardScaler, classifier: C) -> Self {
        Self {
            scaler,
            classifier,
            encoder: ReportEncoder::new(),
        }
    }

    /// Run one submission through the pipeline.
    ///
    /// Returns `None` when the age gate suppresses the submission
    /// (`age <= AGE_GATE_YEARS`); otherwise returns the full report.
    pub fn screen(&self, sample: &PatientSample) -> Option<ScreeningReport> {
        if sample.age <= AGE_GATE_YEARS {
            tracing::debug!(age = sample.age, "Submission below age gate, no report produced");
            return None;
        }

        tracing::debug!("Scaling feature vector...");
        let scaled = self.scaler.transform(&sample.to_vector());

        tracing::debug!("Running classifier...");
        let prediction = self.classifier.predict(&scaled);

        let explanations = ExplanationEngine::explain(sample);
        let report = self.encoder.encode(prediction, explanations);

        tracing::info!(
            label = report.prediction.label.as_str(),
            probability = report.prediction.probability,
            "Screening complete"
        );

        Some(report)
    }
}

impl ScreenEngine<LogisticModel> {
    /// Load both artifacts from a directory containing [`SCALER_FILE`] and
    /// [`CLASSIFIER_FILE`].
    ///
    /// # Errors
    /// Returns an error if either artifact is missing, malformed, or not
    /// 8 features wide. The process must not serve submissions in that case.
    pub fn from_artifact_dir(dir: &Path) -> Result<Self, ScreenError> {
        tracing::info!(dir = %dir.display(), "Loading scaler and classifier artifacts");

        let scaler = StandardScaler::from_file(&dir.join(SCALER_FILE))?;
        let classifier = LogisticModel::from_file(&dir.join(CLASSIFIER_FILE))?;

        tracing::info!("Artifacts loaded");
        Ok(Self::new(scaler, classifier))
    }
}
