//! `drugmon-ai`
//!
//! **Responsibility:** storage-condition classifier.
//!
//! This crate is intentionally **not** part of the alerting flow:
//! - It must not depend on the inventory domain types.
//! - It never changes the status of a tracked medicine.
//! - It emits advisory predictions, not alerts.

pub mod classifier;
pub mod job;
pub mod quality_prediction;
pub mod result;

pub use classifier::{ClassifierTrainer, QualityClassifier, QualityLabel, TRAINING_SET, TrainingSample};
pub use job::AiJob;
pub use quality_prediction::{QualityPredictionJob, ReadingSnapshot};
pub use result::{ClassifierError, QualityPrediction};
