use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use drugmon_core::{BatchNo, DomainError, DomainResult, ValueObject};

use crate::quality::QualityStatus;

/// One storage-condition observation.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionReading {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
}

impl ConditionReading {
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
        }
    }
}

impl ValueObject for ConditionReading {}

/// A medicine batch tracked in memory by the monitoring system.
///
/// Immutable by default: the current reading and the quality status are replaced
/// by building an updated value (`with_reading`, `with_status`). Status is never
/// derived here; see [`crate::assess`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    name: String,
    batch_no: BatchNo,
    mfg_date: NaiveDate,
    exp_date: NaiveDate,
    chemical_composition: String,
    reading: ConditionReading,
    quality_status: QualityStatus,
}

impl Medicine {
    /// Create a not-yet-assessed medicine (`QualityStatus::Unknown`).
    pub fn new(
        name: impl Into<String>,
        batch_no: BatchNo,
        mfg_date: NaiveDate,
        exp_date: NaiveDate,
        chemical_composition: impl Into<String>,
        reading: ConditionReading,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if mfg_date > exp_date {
            return Err(DomainError::validation(format!(
                "batch {batch_no}: manufacture date {mfg_date} is after expiry date {exp_date}"
            )));
        }

        Ok(Self {
            name,
            batch_no,
            mfg_date,
            exp_date,
            chemical_composition: chemical_composition.into(),
            reading,
            quality_status: QualityStatus::Unknown,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn batch_no(&self) -> &BatchNo {
        &self.batch_no
    }

    pub fn mfg_date(&self) -> NaiveDate {
        self.mfg_date
    }

    pub fn exp_date(&self) -> NaiveDate {
        self.exp_date
    }

    pub fn chemical_composition(&self) -> &str {
        &self.chemical_composition
    }

    pub fn reading(&self) -> ConditionReading {
        self.reading
    }

    pub fn temperature(&self) -> f64 {
        self.reading.temperature
    }

    pub fn humidity(&self) -> f64 {
        self.reading.humidity
    }

    pub fn quality_status(&self) -> QualityStatus {
        self.quality_status
    }

    /// True once `on` is past the expiry date (the expiry day itself is still usable).
    pub fn is_expired(&self, on: NaiveDate) -> bool {
        on > self.exp_date
    }

    pub fn with_status(mut self, status: QualityStatus) -> Self {
        self.quality_status = status;
        self
    }

    pub fn with_reading(mut self, reading: ConditionReading) -> Self {
        self.reading = reading;
        self
    }
}

impl ValueObject for Medicine {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn paracetamol() -> Medicine {
        Medicine::new(
            "Paracetamol",
            BatchNo::new("B123").unwrap(),
            date(2024, 1, 1),
            date(2025, 1, 1),
            "C8H9NO2",
            ConditionReading::new(25.0, 50.0),
        )
        .unwrap()
    }

    #[test]
    fn new_medicine_starts_unknown() {
        let m = paracetamol();
        assert_eq!(m.quality_status(), QualityStatus::Unknown);
        assert_eq!(m.batch_no().as_str(), "B123");
        assert_eq!(m.temperature(), 25.0);
        assert_eq!(m.humidity(), 50.0);
    }

    #[test]
    fn rejects_blank_name() {
        let err = Medicine::new(
            "  ",
            BatchNo::new("B1").unwrap(),
            date(2024, 1, 1),
            date(2025, 1, 1),
            "",
            ConditionReading::new(20.0, 40.0),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rejects_manufacture_after_expiry() {
        let err = Medicine::new(
            "Ibuprofen",
            BatchNo::new("B456").unwrap(),
            date(2026, 1, 1),
            date(2025, 1, 1),
            "C13H18O2",
            ConditionReading::new(20.0, 40.0),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn with_methods_return_updated_copies() {
        let original = paracetamol();
        let updated = original
            .clone()
            .with_reading(ConditionReading::new(31.0, 50.0))
            .with_status(QualityStatus::Poor);

        assert_eq!(original.quality_status(), QualityStatus::Unknown);
        assert_eq!(original.temperature(), 25.0);
        assert_eq!(updated.quality_status(), QualityStatus::Poor);
        assert_eq!(updated.temperature(), 31.0);
        assert_eq!(updated.name(), original.name());
    }

    #[test]
    fn expiry_day_is_not_expired() {
        let m = paracetamol();
        assert!(!m.is_expired(date(2025, 1, 1)));
        assert!(m.is_expired(date(2025, 1, 2)));
    }
}
