use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::classifier::QualityClassifier;
use crate::job::AiJob;
use crate::result::{ClassifierError, QualityPrediction};

/// Storage conditions to classify.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadingSnapshot {
    pub temperature: f64,
    pub humidity: f64,
}

/// On-demand prediction over a fitted [`QualityClassifier`].
///
/// Unlike [`QualityClassifier::predict`], this validates its input and reports the
/// model probability alongside the label.
#[derive(Debug, Clone)]
pub struct QualityPredictionJob<'a> {
    model: &'a QualityClassifier,
    input: ReadingSnapshot,
}

impl<'a> QualityPredictionJob<'a> {
    pub fn new(model: &'a QualityClassifier, temperature: f64, humidity: f64) -> Self {
        Self {
            model,
            input: ReadingSnapshot {
                temperature,
                humidity,
            },
        }
    }
}

impl AiJob for QualityPredictionJob<'_> {
    type Input = ReadingSnapshot;
    type Output = QualityPrediction;

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn run(&self) -> Result<QualityPrediction, ClassifierError> {
        let ReadingSnapshot {
            temperature,
            humidity,
        } = self.input;

        if !(temperature.is_finite() && humidity.is_finite()) {
            return Err(ClassifierError::InvalidInput(
                "temperature and humidity must be finite".to_string(),
            ));
        }

        let p = self.model.probability_good(temperature, humidity);
        let label = self.model.predict(temperature, humidity);

        Ok(QualityPrediction::new(label, p)
            .with_explanation(format!(
                "{temperature:.1}°C / {humidity:.1}%RH classified as {label} (P(Good)={p:.3})"
            ))
            .with_metadata(json!({
                "kind": "quality.logistic_regression",
                "temperature": temperature,
                "humidity": humidity,
            })))
    }
}
