//! Form input collection
//!
//! This module models the single-page input form as plain structured data.
//! Every field defaults to zero when unset, matching the form's behavior, and
//! float fields are clamped to zero at this boundary since the form widgets
//! enforce non-negative values.

use serde::Deserialize;

use crate::error::ScreenError;
use crate::types::PatientSample;

/// Raw form submission before it becomes a [`PatientSample`].
///
/// Integer fields are unsigned, so non-negativity is carried by the type.
/// All fields are optional in the serialized form; absent fields read as zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub pregnancies: u32,
    pub glucose: u32,
    pub blood_pressure: u32,
    pub skin_thickness: u32,
    pub insulin: u32,
    pub bmi: f64,
    pub diabetes_pedigree_function: f64,
    pub age: u32,
}

impl FormInput {
    /// Parse a form submission from JSON
    pub fn from_json(json: &str) -> Result<Self, ScreenError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert the submission into an immutable sample, clamping float
    /// fields to zero
    pub fn into_sample(self) -> PatientSample {
        PatientSample {
            pregnancies: self.pregnancies,
            glucose: self.glucose,
            blood_pressure: self.blood_pressure,
            skin_thickness: self.skin_thickness,
            insulin: self.insulin,
            bmi: self.bmi.max(0.0),
            diabetes_pedigree_function: self.diabetes_pedigree_function.max(0.0),
            age: self.age,
        }
    }
}
