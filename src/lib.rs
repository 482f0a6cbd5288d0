//! Diascreen - on-device diabetes risk screening with rule-based explanations
//!
//! Diascreen runs one form submission through a deterministic pipeline:
//! input collection → feature scaling → binary classification → rule-based
//! explanation → report encoding.
//!
//! The scaler and classifier are externally trained artifacts loaded once at
//! startup; the crate performs no training and keeps no per-request state.

pub mod error;
pub mod explain;
pub mod form;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod scaler;
pub mod types;

pub use error::ScreenError;
pub use form::FormInput;
pub use model::{Classifier, LogisticModel};
pub use pipeline::ScreenEngine;
pub use scaler::StandardScaler;
pub use types::{PatientSample, Prediction, RiskLabel, ScreeningReport};

/// Diascreen version embedded in all report payloads
pub const DIASCREEN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "diascreen";
