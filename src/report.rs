//! Report encoding and presentation
//!
//! This module assembles the classifier output and the factor explanations
//! into a screening report, and renders the report as the plain-text page a
//! user sees: headline, factor analysis, recommendations.

use chrono::Utc;
use uuid::Uuid;

use crate::types::{Explanation, Prediction, ReportProducer, RiskLabel, ScreeningReport};
use crate::{DIASCREEN_VERSION, PRODUCER_NAME};

/// Recommendation lines shown when diabetes is suspected
pub const POSITIVE_RECOMMENDATIONS: [&str; 3] = [
    "Consult a doctor for further glucose testing.",
    "Maintain a low-sugar, high-fiber diet.",
    "Include regular exercise in your daily routine.",
];

/// Recommendation lines shown when diabetes is not suspected
pub const NEGATIVE_RECOMMENDATIONS: [&str; 2] = [
    "Maintain a balanced diet and regular health check-ups.",
    "Continue healthy habits to stay diabetes-free.",
];

/// Report encoder stamping each report with producer metadata
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Assemble a screening report from the pipeline outputs
    pub fn encode(&self, prediction: Prediction, explanations: Vec<Explanation>) -> ScreeningReport {
        let recommendations = match prediction.label {
            RiskLabel::Suspected => POSITIVE_RECOMMENDATIONS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            RiskLabel::NotSuspected => NEGATIVE_RECOMMENDATIONS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        };

        ScreeningReport {
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: DIASCREEN_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            produced_at: Utc::now(),
            prediction,
            headline: headline(prediction),
            explanations,
            recommendations,
        }
    }
}

/// Headline line: label text plus the positive-class probability to two
/// decimal places
fn headline(prediction: Prediction) -> String {
    match prediction.label {
        RiskLabel::Suspected => format!(
            "Diabetes Suspected — Risk Probability: {:.2}%",
            prediction.probability_pct()
        ),
        RiskLabel::NotSuspected => format!(
            "Diabetes Not Suspected — Risk Probability: {:.2}%",
            prediction.probability_pct()
        ),
    }
}

impl ScreeningReport {
    /// Render the report as the plain-text result page
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Prediction Result\n");
        out.push_str("=================\n");
        out.push_str(&self.headline);
        out.push_str("\n\nHealth Factor Analysis:\n");
        for explanation in &self.explanations {
            out.push_str(&format!("  - {}: {}\n", explanation.factor, explanation.text));
        }
        out.push_str("\nRecommendations:\n");
        for recommendation in &self.recommendations {
            out.push_str(&format!("  - {recommendation}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed_encoder() -> ReportEncoder {
        ReportEncoder::with_instance_id("test-instance".to_string())
    }

    fn sample_explanations() -> Vec<Explanation> {
        vec![
            Explanation {
                factor: "Glucose Level".to_string(),
                text: "High glucose levels (150 mg/dL) indicate a higher risk of diabetes."
                    .to_string(),
                elevated: true,
            },
            Explanation {
                factor: "BMI".to_string(),
                text: "A BMI of 35.0 indicates overweight, which increases diabetes risk."
                    .to_string(),
                elevated: true,
            },
            Explanation {
                factor: "Insulin Level".to_string(),
                text: "Insulin levels (200 µU/mL) are high, suggesting possible insulin resistance."
                    .to_string(),
                elevated: true,
            },
            Explanation {
                factor: "Age".to_string(),
                text: "Age 50 is a significant risk factor for diabetes.".to_string(),
                elevated: true,
            },
        ]
    }

    #[test]
    fn test_positive_report_shape() {
        let report = fixed_encoder().encode(
            Prediction {
                label: RiskLabel::Suspected,
                probability: 0.8312,
            },
            sample_explanations(),
        );

        assert_eq!(report.headline, "Diabetes Suspected — Risk Probability: 83.12%");
        assert_eq!(report.explanations.len(), 4);
        assert_eq!(report.recommendations.len(), 3);
        assert_eq!(report.producer.name, "diascreen");
    }

    #[test]
    fn test_negative_report_shape() {
        let report = fixed_encoder().encode(
            Prediction {
                label: RiskLabel::NotSuspected,
                probability: 0.2,
            },
            sample_explanations(),
        );

        assert_eq!(
            report.headline,
            "Diabetes Not Suspected — Risk Probability: 20.00%"
        );
        assert_eq!(report.recommendations.len(), 2);
        assert_eq!(
            report.recommendations[0],
            "Maintain a balanced diet and regular health check-ups."
        );
    }

    #[test]
    fn test_render_text_exact() {
        let report = fixed_encoder().encode(
            Prediction {
                label: RiskLabel::Suspected,
                probability: 0.75,
            },
            sample_explanations(),
        );

        let expected = "\
Prediction Result
=================
Diabetes Suspected — Risk Probability: 75.00%

Health Factor Analysis:
  - Glucose Level: High glucose levels (150 mg/dL) indicate a higher risk of diabetes.
  - BMI: A BMI of 35.0 indicates overweight, which increases diabetes risk.
  - Insulin Level: Insulin levels (200 µU/mL) are high, suggesting possible insulin resistance.
  - Age: Age 50 is a significant risk factor for diabetes.

Recommendations:
  - Consult a doctor for further glucose testing.
  - Maintain a low-sugar, high-fiber diet.
  - Include regular exercise in your daily routine.
";
        assert_eq!(report.render_text(), expected);
    }

    #[test]
    fn test_report_serializes() {
        let report = fixed_encoder().encode(
            Prediction {
                label: RiskLabel::Suspected,
                probability: 0.75,
            },
            sample_explanations(),
        );

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&report).expect("Serializable"))
                .expect("Valid JSON");
        assert_eq!(json["producer"]["instance_id"], "test-instance");
        assert_eq!(json["prediction"]["label"], "suspected");
    }
}
