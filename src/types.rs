//! Core types for the diascreen pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: the raw patient sample, the classifier prediction, the rule-based
//! explanations, and the final screening report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of features the scaler and classifier operate on
pub const FEATURE_COUNT: usize = 8;

/// Feature names in the fixed pipeline order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "pregnancies",
    "glucose",
    "blood_pressure",
    "skin_thickness",
    "insulin",
    "bmi",
    "diabetes_pedigree_function",
    "age",
];

/// One submission's worth of health measurements.
///
/// Integer fields are non-negative by construction; float fields are clamped
/// at the collection boundary (see [`crate::form::FormInput`]). A sample is
/// built fresh per submission and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSample {
    /// Number of pregnancies
    pub pregnancies: u32,
    /// Plasma glucose concentration (mg/dL)
    pub glucose: u32,
    /// Diastolic blood pressure (mm Hg)
    pub blood_pressure: u32,
    /// Triceps skin fold thickness (mm)
    pub skin_thickness: u32,
    /// 2-hour serum insulin (µU/mL)
    pub insulin: u32,
    /// Body mass index
    pub bmi: f64,
    /// Diabetes pedigree function
    pub diabetes_pedigree_function: f64,
    /// Age in years
    pub age: u32,
}

impl PatientSample {
    /// Flatten the sample into the fixed-order feature vector consumed by the
    /// scaler. Order matches [`FEATURE_NAMES`].
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.pregnancies),
            f64::from(self.glucose),
            f64::from(self.blood_pressure),
            f64::from(self.skin_thickness),
            f64::from(self.insulin),
            self.bmi,
            self.diabetes_pedigree_function,
            f64::from(self.age),
        ]
    }
}

/// Binary screening outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    /// Class 0 - diabetes not suspected
    NotSuspected,
    /// Class 1 - diabetes suspected
    Suspected,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::NotSuspected => "not_suspected",
            RiskLabel::Suspected => "suspected",
        }
    }
}

/// Classifier output: a label plus the positive-class probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: RiskLabel,
    /// Probability of the positive (suspected) class, 0-1
    pub probability: f64,
}

impl Prediction {
    /// Positive-class probability expressed as a percentage (0-100)
    pub fn probability_pct(&self) -> f64 {
        self.probability * 100.0
    }
}

/// One rule-based annotation for a single health factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// Factor name, e.g. "Glucose Level"
    pub factor: String,
    /// Human-readable commentary for this factor
    pub text: String,
    /// Whether the rule fired on its high-risk branch
    pub elevated: bool,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Complete screening report for one submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub producer: ReportProducer,
    pub produced_at: DateTime<Utc>,
    /// Raw classifier output
    pub prediction: Prediction,
    /// Headline line combining label and probability percentage
    pub headline: String,
    /// The four factor explanations in fixed order
    pub explanations: Vec<Explanation>,
    /// Label-dependent recommendation lines (three positive, two negative)
    pub recommendations: Vec<String>,
}
