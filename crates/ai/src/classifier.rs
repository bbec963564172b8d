use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::result::ClassifierError;

/// Binary label produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityLabel {
    Good,
    Poor,
}

impl QualityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLabel::Good => "Good",
            QualityLabel::Poor => "Poor",
        }
    }
}

impl core::fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One labelled `(temperature, humidity)` observation. `good == true` is the positive class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub temperature: f64,
    pub humidity: f64,
    pub good: bool,
}

impl TrainingSample {
    pub const fn new(temperature: f64, humidity: f64, good: bool) -> Self {
        Self {
            temperature,
            humidity,
            good,
        }
    }

    /// Build a sample from a numeric class label (1 = Good, 0 = Poor).
    pub fn from_label(temperature: f64, humidity: f64, label: u8) -> Result<Self, ClassifierError> {
        match label {
            0 => Ok(Self::new(temperature, humidity, false)),
            1 => Ok(Self::new(temperature, humidity, true)),
            other => Err(ClassifierError::InvalidInput(format!(
                "label must be 0 or 1, got {other}"
            ))),
        }
    }

    fn features(&self) -> [f64; 2] {
        [self.temperature, self.humidity]
    }

    fn target(&self) -> f64 {
        if self.good { 1.0 } else { 0.0 }
    }
}

/// Fixed training set the default model is fitted on.
pub const TRAINING_SET: [TrainingSample; 5] = [
    TrainingSample::new(25.0, 40.0, true),
    TrainingSample::new(32.0, 75.0, false),
    TrainingSample::new(20.0, 50.0, true),
    TrainingSample::new(35.0, 80.0, false),
    TrainingSample::new(15.0, 30.0, true),
];

/// Logistic-regression trainer.
///
/// Model:
/// - Standardise both features with the training mean and population std.
/// - Minimise L2-regularised log-loss with full-batch gradient descent.
/// - The intercept is not penalised; `regularization` is the inverse strength `C`.
///
/// Fitting is deterministic: same samples and settings give the same weights.
#[derive(Debug, Clone)]
pub struct ClassifierTrainer {
    learning_rate: f64,
    iterations: usize,
    regularization: f64,
}

impl Default for ClassifierTrainer {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            iterations: 1000,
            regularization: 1.0,
        }
    }
}

impl ClassifierTrainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_regularization(mut self, c: f64) -> Self {
        self.regularization = c;
        self
    }

    /// Fit a classifier on caller-provided samples.
    pub fn fit(&self, samples: &[TrainingSample]) -> Result<QualityClassifier, ClassifierError> {
        if samples.is_empty() {
            return Err(ClassifierError::InvalidInput(
                "at least one training sample is required".to_string(),
            ));
        }
        if samples
            .iter()
            .any(|s| !(s.temperature.is_finite() && s.humidity.is_finite()))
        {
            return Err(ClassifierError::InvalidInput(
                "training features must be finite".to_string(),
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ClassifierError::InvalidInput(
                "learning_rate must be a finite positive number".to_string(),
            ));
        }
        if !(self.regularization.is_finite() && self.regularization > 0.0) {
            return Err(ClassifierError::InvalidInput(
                "regularization must be a finite positive number".to_string(),
            ));
        }
        if self.iterations == 0 {
            return Err(ClassifierError::InvalidInput(
                "iterations must be >= 1".to_string(),
            ));
        }

        let model = self.fit_validated(samples);
        if !model.is_finite() {
            return Err(ClassifierError::TrainingFailed(format!(
                "gradient descent diverged (learning_rate={})",
                self.learning_rate
            )));
        }
        Ok(model)
    }

    fn fit_validated(&self, samples: &[TrainingSample]) -> QualityClassifier {
        let n = samples.len() as f64;

        let mut mean = [0.0; 2];
        let mut scale = [1.0; 2];
        for j in 0..2 {
            let column: Vec<f64> = samples.iter().map(|s| s.features()[j]).collect();
            mean[j] = column.iter().sum::<f64>() / n;
            let std = stddev_population(&column, mean[j]);
            // Constant feature: leave it unscaled rather than dividing by zero.
            if std > f64::EPSILON {
                scale[j] = std;
            }
        }

        let standardized: Vec<([f64; 2], f64)> = samples
            .iter()
            .map(|s| {
                let x = s.features();
                (
                    [(x[0] - mean[0]) / scale[0], (x[1] - mean[1]) / scale[1]],
                    s.target(),
                )
            })
            .collect();

        let penalty = 1.0 / (self.regularization * n);
        let mut weights = [0.0; 2];
        let mut intercept = 0.0;

        for _ in 0..self.iterations {
            let mut grad = [0.0; 2];
            let mut grad_intercept = 0.0;
            for (z, y) in &standardized {
                let err = sigmoid(weights[0] * z[0] + weights[1] * z[1] + intercept) - y;
                grad[0] += err * z[0];
                grad[1] += err * z[1];
                grad_intercept += err;
            }
            for j in 0..2 {
                weights[j] -= self.learning_rate * (grad[j] / n + penalty * weights[j]);
            }
            intercept -= self.learning_rate * grad_intercept / n;
        }

        debug!(
            w_temperature = weights[0],
            w_humidity = weights[1],
            intercept,
            samples = samples.len(),
            "fitted quality classifier"
        );

        QualityClassifier {
            weights,
            intercept,
            mean,
            scale,
        }
    }
}

/// Fitted binary classifier over `(temperature, humidity)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityClassifier {
    weights: [f64; 2],
    intercept: f64,
    mean: [f64; 2],
    scale: [f64; 2],
}

impl QualityClassifier {
    /// Fit the default model on [`TRAINING_SET`].
    pub fn train() -> Self {
        ClassifierTrainer::default().fit_validated(&TRAINING_SET)
    }

    /// Model output P(Good) for one reading.
    ///
    /// Non-finite input is not guarded and yields a non-finite probability.
    pub fn probability_good(&self, temperature: f64, humidity: f64) -> f64 {
        let z0 = (temperature - self.mean[0]) / self.scale[0];
        let z1 = (humidity - self.mean[1]) / self.scale[1];
        sigmoid(self.weights[0] * z0 + self.weights[1] * z1 + self.intercept)
    }

    /// `Good` when P(Good) >= 0.5, otherwise `Poor`.
    pub fn predict(&self, temperature: f64, humidity: f64) -> QualityLabel {
        if self.probability_good(temperature, humidity) >= 0.5 {
            QualityLabel::Good
        } else {
            QualityLabel::Poor
        }
    }

    fn is_finite(&self) -> bool {
        self.weights.iter().all(|w| w.is_finite()) && self.intercept.is_finite()
    }
}

impl Default for QualityClassifier {
    fn default() -> Self {
        Self::train()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn stddev_population(xs: &[f64], mean: f64) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let var = xs
        .iter()
        .map(|x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / (xs.len() as f64);
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproduces_training_labels() {
        let model = QualityClassifier::train();
        for sample in TRAINING_SET {
            let expected = if sample.good {
                QualityLabel::Good
            } else {
                QualityLabel::Poor
            };
            assert_eq!(
                model.predict(sample.temperature, sample.humidity),
                expected,
                "sample {sample:?}"
            );
        }
    }

    #[test]
    fn predicts_documented_points() {
        let model = QualityClassifier::train();
        assert_eq!(model.predict(25.0, 40.0), QualityLabel::Good);
        assert_eq!(model.predict(35.0, 80.0), QualityLabel::Poor);
    }

    #[test]
    fn far_from_boundary_points_are_confident() {
        let model = QualityClassifier::train();
        assert_eq!(model.predict(45.0, 95.0), QualityLabel::Poor);
        assert_eq!(model.predict(18.0, 25.0), QualityLabel::Good);
        assert!(model.probability_good(45.0, 95.0) < 0.2);
        assert!(model.probability_good(18.0, 25.0) > 0.8);
    }

    #[test]
    fn training_is_deterministic() {
        assert_eq!(QualityClassifier::train(), QualityClassifier::train());
    }

    #[test]
    fn fit_rejects_bad_input() {
        let trainer = ClassifierTrainer::new();
        assert!(matches!(
            trainer.fit(&[]),
            Err(ClassifierError::InvalidInput(_))
        ));
        assert!(matches!(
            trainer.fit(&[TrainingSample::new(f64::NAN, 10.0, true)]),
            Err(ClassifierError::InvalidInput(_))
        ));
        assert!(matches!(
            ClassifierTrainer::new()
                .with_learning_rate(0.0)
                .fit(&TRAINING_SET),
            Err(ClassifierError::InvalidInput(_))
        ));
        assert!(matches!(
            ClassifierTrainer::new().with_iterations(0).fit(&TRAINING_SET),
            Err(ClassifierError::InvalidInput(_))
        ));
    }

    #[test]
    fn from_label_accepts_only_binary_labels() {
        assert!(TrainingSample::from_label(25.0, 40.0, 1).unwrap().good);
        assert!(!TrainingSample::from_label(32.0, 75.0, 0).unwrap().good);
        assert!(TrainingSample::from_label(32.0, 75.0, 2).is_err());
    }

    #[test]
    fn custom_fit_matches_default_training() {
        let fitted = ClassifierTrainer::new().fit(&TRAINING_SET).unwrap();
        assert_eq!(fitted, QualityClassifier::train());
    }
}
