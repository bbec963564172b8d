//! Monitoring orchestrator: tracks medicines, re-assesses them and raises alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use drugmon_ai::{QualityClassifier, QualityLabel};
use drugmon_core::{AlertId, BatchNo, DomainError, DomainResult, LogId};
use drugmon_inventory::{ConditionReading, Medicine, QualityStatus, assess};

use crate::config::StoreConfig;
use crate::persistence::{ReadingLog, SqliteStore, StoreError};

/// Raised when a medicine's status changes to Poor or Critical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAlert {
    pub id: AlertId,
    pub name: String,
    pub batch_no: BatchNo,
    pub status: QualityStatus,
    pub temperature: f64,
    pub humidity: f64,
    pub observed_at: DateTime<Utc>,
}

impl QualityAlert {
    fn for_medicine(medicine: &Medicine, observed_at: DateTime<Utc>) -> Self {
        Self {
            id: AlertId::new(),
            name: medicine.name().to_string(),
            batch_no: medicine.batch_no().clone(),
            status: medicine.quality_status(),
            temperature: medicine.temperature(),
            humidity: medicine.humidity(),
            observed_at,
        }
    }
}

/// Explicit monitoring context.
///
/// Owns the tracked medicines (insertion order, duplicates allowed), the reading log
/// every assessment is written to, and the classifier used for on-demand predictions.
#[derive(Debug)]
pub struct MonitoringSystem<L: ReadingLog = SqliteStore> {
    log: L,
    classifier: QualityClassifier,
    medicines: Vec<Medicine>,
}

impl MonitoringSystem<SqliteStore> {
    /// Open the SQLite store described by `config` and start with no tracked medicines.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        Ok(Self::with_log(SqliteStore::open(config)?))
    }

    /// Release the underlying store.
    pub fn close(self) {
        info!(tracked = self.medicines.len(), "closing monitoring system");
        self.log.close();
    }

    pub fn store(&self) -> &SqliteStore {
        &self.log
    }
}

impl<L: ReadingLog> MonitoringSystem<L> {
    /// Build a system over any reading log. The classifier is trained here, once.
    pub fn with_log(log: L) -> Self {
        Self {
            log,
            classifier: QualityClassifier::train(),
            medicines: Vec::new(),
        }
    }

    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn into_log(self) -> L {
        self.log
    }

    pub fn classifier(&self) -> &QualityClassifier {
        &self.classifier
    }

    /// Start tracking `medicine` and persist its initial reading.
    ///
    /// The reading is logged first; if that fails the medicine is not tracked.
    pub fn add(&mut self, medicine: Medicine) -> Result<LogId, StoreError> {
        let log_id = self.log.log_reading(
            medicine.batch_no(),
            medicine.reading(),
            medicine.quality_status(),
        )?;
        debug!(batch_no = %medicine.batch_no(), name = medicine.name(), "tracking medicine");
        self.medicines.push(medicine);
        Ok(log_id)
    }

    /// Replace the current reading of every tracked medicine with `batch_no`.
    ///
    /// Status is left as-is until the next [`monitor_conditions`](Self::monitor_conditions) pass.
    /// Returns how many medicines were updated.
    pub fn record_reading(&mut self, batch_no: &BatchNo, reading: ConditionReading) -> DomainResult<usize> {
        let mut updated = 0;
        for medicine in self.medicines.iter_mut().filter(|m| m.batch_no() == batch_no) {
            *medicine = medicine.clone().with_reading(reading);
            updated += 1;
        }
        if updated == 0 {
            return Err(DomainError::not_found(format!("batch {batch_no} is not tracked")));
        }
        Ok(updated)
    }

    /// Re-assess every tracked medicine in order and log each reading.
    ///
    /// An alert is raised when the new status is Poor or Critical and differs from the
    /// previous one. The first storage error aborts the pass; medicines already visited
    /// keep their new status.
    pub fn monitor_conditions(&mut self) -> Result<Vec<QualityAlert>, StoreError> {
        let mut alerts = Vec::new();

        for medicine in self.medicines.iter_mut() {
            let previous = medicine.quality_status();
            let current = assess(medicine.reading());
            *medicine = medicine.clone().with_status(current);

            if current != QualityStatus::Good && current != previous {
                let alert = QualityAlert::for_medicine(medicine, Utc::now());
                warn!(
                    batch_no = %alert.batch_no,
                    name = %alert.name,
                    status = %alert.status,
                    temperature = alert.temperature,
                    humidity = alert.humidity,
                    "storage quality alert"
                );
                alerts.push(alert);
            }

            self.log
                .log_reading(medicine.batch_no(), medicine.reading(), current)?;
        }

        info!(
            tracked = self.medicines.len(),
            alerts = alerts.len(),
            "monitoring pass complete"
        );
        Ok(alerts)
    }

    /// Classifier prediction for an arbitrary reading. Advisory only; never alters status.
    pub fn predict_quality(&self, temperature: f64, humidity: f64) -> QualityLabel {
        self.classifier.predict(temperature, humidity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::InMemoryReadingLog;
    use chrono::NaiveDate;

    fn medicine(name: &str, batch_no: &str, temperature: f64, humidity: f64) -> Medicine {
        Medicine::new(
            name,
            BatchNo::new(batch_no).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            "C8H9NO2",
            ConditionReading::new(temperature, humidity),
        )
        .unwrap()
    }

    fn system() -> MonitoringSystem<InMemoryReadingLog> {
        MonitoringSystem::with_log(InMemoryReadingLog::new())
    }

    #[test]
    fn add_logs_initial_unknown_reading() {
        let mut sys = system();
        sys.add(medicine("Paracetamol", "B123", 25.0, 50.0)).unwrap();

        assert_eq!(sys.medicines().len(), 1);
        assert_eq!(sys.medicines()[0].quality_status(), QualityStatus::Unknown);
        let entries = sys.log().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quality_status, QualityStatus::Unknown);
    }

    #[test]
    fn good_reading_becomes_good_without_alert() {
        let mut sys = system();
        sys.add(medicine("Paracetamol", "B123", 25.0, 50.0)).unwrap();

        let alerts = sys.monitor_conditions().unwrap();
        assert!(alerts.is_empty());
        assert_eq!(sys.medicines()[0].quality_status(), QualityStatus::Good);
        assert_eq!(sys.log().entries().len(), 2);
    }

    #[test]
    fn poor_reading_raises_exactly_one_alert() {
        let mut sys = system();
        sys.add(medicine("Ibuprofen", "B456", 32.0, 75.0)).unwrap();

        let alerts = sys.monitor_conditions().unwrap();
        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.name, "Ibuprofen");
        assert_eq!(alert.batch_no.as_str(), "B456");
        assert_eq!(alert.status, QualityStatus::Poor);
        assert_eq!(alert.temperature, 32.0);
        assert_eq!(alert.humidity, 75.0);
    }

    #[test]
    fn unchanged_readings_do_not_alert_twice() {
        let mut sys = system();
        sys.add(medicine("Ibuprofen", "B456", 32.0, 75.0)).unwrap();

        assert_eq!(sys.monitor_conditions().unwrap().len(), 1);
        assert!(sys.monitor_conditions().unwrap().is_empty());
        assert_eq!(sys.medicines()[0].quality_status(), QualityStatus::Poor);
        // One row from add, one per pass.
        assert_eq!(sys.log().entries().len(), 3);
    }

    #[test]
    fn alerts_follow_collection_order() {
        let mut sys = system();
        sys.add(medicine("Cold", "C1", 5.0, 50.0)).unwrap();
        sys.add(medicine("Fine", "F1", 22.0, 45.0)).unwrap();
        sys.add(medicine("Hot", "H1", 40.0, 50.0)).unwrap();

        let alerts = sys.monitor_conditions().unwrap();
        let batches: Vec<_> = alerts.iter().map(|a| a.batch_no.as_str()).collect();
        assert_eq!(batches, vec!["C1", "H1"]);
        assert_eq!(alerts[0].status, QualityStatus::Critical);
        assert_eq!(alerts[1].status, QualityStatus::Poor);
    }

    #[test]
    fn status_change_between_bad_states_alerts_again() {
        let mut sys = system();
        let batch = BatchNo::new("B456").unwrap();
        sys.add(medicine("Ibuprofen", "B456", 32.0, 75.0)).unwrap();
        assert_eq!(sys.monitor_conditions().unwrap().len(), 1);

        sys.record_reading(&batch, ConditionReading::new(10.0, 50.0)).unwrap();
        let alerts = sys.monitor_conditions().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].status, QualityStatus::Critical);

        // Recovery to Good is silent.
        sys.record_reading(&batch, ConditionReading::new(22.0, 45.0)).unwrap();
        assert!(sys.monitor_conditions().unwrap().is_empty());
        assert_eq!(sys.medicines()[0].quality_status(), QualityStatus::Good);
    }

    #[test]
    fn record_reading_updates_all_duplicates() {
        let mut sys = system();
        sys.add(medicine("Paracetamol", "B123", 25.0, 50.0)).unwrap();
        sys.add(medicine("Paracetamol", "B123", 25.0, 50.0)).unwrap();

        let n = sys
            .record_reading(&BatchNo::new("B123").unwrap(), ConditionReading::new(31.0, 50.0))
            .unwrap();
        assert_eq!(n, 2);
        assert!(sys.medicines().iter().all(|m| m.temperature() == 31.0));
        // Status only changes on the next pass.
        assert!(sys.medicines().iter().all(|m| m.quality_status() == QualityStatus::Unknown));
    }

    #[test]
    fn record_reading_for_untracked_batch_is_not_found() {
        let mut sys = system();
        let err = sys
            .record_reading(&BatchNo::new("ZZZ").unwrap(), ConditionReading::new(20.0, 40.0))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn add_failure_leaves_medicine_untracked() {
        let log = InMemoryReadingLog::with_known_batches([BatchNo::new("B123").unwrap()]);
        let mut sys = MonitoringSystem::with_log(log);

        let err = sys.add(medicine("Unknown", "B999", 25.0, 50.0)).unwrap_err();
        assert!(matches!(err, StoreError::UnknownBatch(_)));
        assert!(sys.medicines().is_empty());
    }

    #[test]
    fn predict_quality_uses_trained_classifier() {
        let sys = system();
        assert_eq!(sys.predict_quality(25.0, 40.0), QualityLabel::Good);
        assert_eq!(sys.predict_quality(35.0, 80.0), QualityLabel::Poor);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a second pass over unchanged readings never alerts.
            #[test]
            fn second_pass_is_silent(
                readings in proptest::collection::vec((-20.0f64..60.0, 0.0f64..100.0), 1..8)
            ) {
                let mut sys = system();
                for (i, (t, h)) in readings.iter().enumerate() {
                    sys.add(medicine("Drug", &format!("B{i}"), *t, *h)).unwrap();
                }

                let first = sys.monitor_conditions().unwrap();
                let statuses: Vec<_> = sys.medicines().iter().map(|m| m.quality_status()).collect();
                let second = sys.monitor_conditions().unwrap();

                prop_assert!(first.len() <= readings.len());
                prop_assert!(second.is_empty());
                prop_assert_eq!(
                    statuses,
                    sys.medicines().iter().map(|m| m.quality_status()).collect::<Vec<_>>()
                );
            }
        }
    }
}
