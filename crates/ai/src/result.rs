use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::classifier::QualityLabel;

/// Outcome of a single classifier prediction.
///
/// This is an advisory insight; it never changes the status of a tracked medicine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityPrediction {
    pub label: QualityLabel,

    /// Model output P(Good) in \[0, 1\].
    pub probability_good: f64,

    /// Probability of the predicted label (>= 0.5).
    pub confidence: f64,

    /// Optional human-readable explanation.
    pub explanation: Option<String>,

    /// Free-form metadata (model kind, inputs).
    pub metadata: JsonValue,
}

impl QualityPrediction {
    pub fn new(label: QualityLabel, probability_good: f64) -> Self {
        let confidence = match label {
            QualityLabel::Good => probability_good,
            QualityLabel::Poor => 1.0 - probability_good,
        };
        Self {
            label,
            probability_good,
            confidence,
            explanation: None,
            metadata: JsonValue::Null,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = metadata;
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("invalid classifier input: {0}")]
    InvalidInput(String),

    #[error("training failed: {0}")]
    TrainingFailed(String),
}
