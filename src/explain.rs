//! Rule-based explanations
//!
//! This module maps raw feature values to human-readable risk commentary.
//! Four independent threshold rules, each evaluated unconditionally and
//! independently of the classifier's own output. Ordering is fixed so report
//! output is reproducible.

use crate::types::{Explanation, PatientSample};

/// Glucose above this (mg/dL) reads as high risk
pub const GLUCOSE_THRESHOLD: u32 = 140;

/// BMI above this reads as overweight
pub const BMI_THRESHOLD: f64 = 30.0;

/// Insulin above this (µU/mL) suggests insulin resistance
pub const INSULIN_THRESHOLD: u32 = 150;

/// Age above this (years) reads as a significant risk factor
pub const AGE_THRESHOLD: u32 = 45;

/// Explanation engine producing the fixed-order factor annotations
pub struct ExplanationEngine;

impl ExplanationEngine {
    /// Evaluate all four rules against a sample.
    ///
    /// Always returns exactly four entries, in order: Glucose Level, BMI,
    /// Insulin Level, Age. Thresholds are strict (`>`, not `>=`).
    pub fn explain(sample: &PatientSample) -> Vec<Explanation> {
        vec![
            explain_glucose(sample),
            explain_bmi(sample),
            explain_insulin(sample),
            explain_age(sample),
        ]
    }
}

fn explain_glucose(sample: &PatientSample) -> Explanation {
    let elevated = sample.glucose > GLUCOSE_THRESHOLD;
    let text = if elevated {
        format!(
            "High glucose levels ({} mg/dL) indicate a higher risk of diabetes.",
            sample.glucose
        )
    } else {
        format!(
            "Glucose levels ({} mg/dL) are within normal range.",
            sample.glucose
        )
    };

    Explanation {
        factor: "Glucose Level".to_string(),
        text,
        elevated,
    }
}

fn explain_bmi(sample: &PatientSample) -> Explanation {
    let elevated = sample.bmi > BMI_THRESHOLD;
    let text = if elevated {
        format!(
            "A BMI of {:.1} indicates overweight, which increases diabetes risk.",
            sample.bmi
        )
    } else {
        format!("BMI of {:.1} is within a healthy range.", sample.bmi)
    };

    Explanation {
        factor: "BMI".to_string(),
        text,
        elevated,
    }
}

fn explain_insulin(sample: &PatientSample) -> Explanation {
    let elevated = sample.insulin > INSULIN_THRESHOLD;
    let text = if elevated {
        format!(
            "Insulin levels ({} µU/mL) are high, suggesting possible insulin resistance.",
            sample.insulin
        )
    } else {
        format!(
            "Insulin levels ({} µU/mL) are within normal range.",
            sample.insulin
        )
    };

    Explanation {
        factor: "Insulin Level".to_string(),
        text,
        elevated,
    }
}

fn explain_age(sample: &PatientSample) -> Explanation {
    let elevated = sample.age > AGE_THRESHOLD;
    let text = if elevated {
        format!(
            "Age {} is a significant risk factor for diabetes.",
            sample.age
        )
    } else {
        format!("Age {} is not a major risk factor for diabetes.", sample.age)
    };

    Explanation {
        factor: "Age".to_string(),
        text,
        elevated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_with(glucose: u32, bmi: f64, insulin: u32, age: u32) -> PatientSample {
        PatientSample {
            pregnancies: 0,
            glucose,
            blood_pressure: 0,
            skin_thickness: 0,
            insulin,
            bmi,
            diabetes_pedigree_function: 0.0,
            age,
        }
    }

    #[test]
    fn test_fixed_order_and_count() {
        let explanations = ExplanationEngine::explain(&sample_with(0, 0.0, 0, 0));
        let factors: Vec<&str> = explanations.iter().map(|e| e.factor.as_str()).collect();
        assert_eq!(factors, vec!["Glucose Level", "BMI", "Insulin Level", "Age"]);
    }

    #[test]
    fn test_glucose_boundary_is_strict() {
        let at = ExplanationEngine::explain(&sample_with(140, 0.0, 0, 0));
        assert!(!at[0].elevated);
        assert_eq!(at[0].text, "Glucose levels (140 mg/dL) are within normal range.");

        let above = ExplanationEngine::explain(&sample_with(141, 0.0, 0, 0));
        assert!(above[0].elevated);
        assert_eq!(
            above[0].text,
            "High glucose levels (141 mg/dL) indicate a higher risk of diabetes."
        );
    }

    #[test]
    fn test_bmi_boundary_is_strict() {
        let at = ExplanationEngine::explain(&sample_with(0, 30.0, 0, 0));
        assert!(!at[1].elevated);
        assert_eq!(at[1].text, "BMI of 30.0 is within a healthy range.");

        let above = ExplanationEngine::explain(&sample_with(0, 30.1, 0, 0));
        assert!(above[1].elevated);
        assert_eq!(
            above[1].text,
            "A BMI of 30.1 indicates overweight, which increases diabetes risk."
        );
    }

    #[test]
    fn test_insulin_boundary_is_strict() {
        let at = ExplanationEngine::explain(&sample_with(0, 0.0, 150, 0));
        assert!(!at[2].elevated);

        let above = ExplanationEngine::explain(&sample_with(0, 0.0, 151, 0));
        assert!(above[2].elevated);
        assert_eq!(
            above[2].text,
            "Insulin levels (151 µU/mL) are high, suggesting possible insulin resistance."
        );
    }

    #[test]
    fn test_age_boundary_is_strict() {
        let at = ExplanationEngine::explain(&sample_with(0, 0.0, 0, 45));
        assert!(!at[3].elevated);
        assert_eq!(at[3].text, "Age 45 is not a major risk factor for diabetes.");

        let above = ExplanationEngine::explain(&sample_with(0, 0.0, 0, 46));
        assert!(above[3].elevated);
        assert_eq!(above[3].text, "Age 46 is a significant risk factor for diabetes.");
    }

    #[test]
    fn test_all_factors_elevated() {
        let explanations = ExplanationEngine::explain(&sample_with(150, 35.0, 200, 50));
        assert!(explanations.iter().all(|e| e.elevated));
    }

    #[test]
    fn test_zero_sample_older_patient() {
        // Everything at zero except age: only the age rule fires
        let explanations = ExplanationEngine::explain(&sample_with(0, 0.0, 0, 60));
        assert!(!explanations[0].elevated);
        assert!(!explanations[1].elevated);
        assert!(!explanations[2].elevated);
        assert!(explanations[3].elevated);
        assert_eq!(explanations[3].text, "Age 60 is a significant risk factor for diabetes.");
    }
}
