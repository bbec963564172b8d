//! Rule-based quality assessment of storage conditions.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use drugmon_core::DomainError;

use crate::medicine::ConditionReading;

/// Above this temperature (°C) a batch is stored too warm.
pub const MAX_TEMPERATURE_C: f64 = 30.0;
/// Above this relative humidity (%) a batch is stored too damp.
pub const MAX_HUMIDITY_PCT: f64 = 70.0;
/// Below this temperature (°C) a batch is stored too cold.
pub const MIN_TEMPERATURE_C: f64 = 15.0;
/// Below this relative humidity (%) a batch is stored too dry.
pub const MIN_HUMIDITY_PCT: f64 = 20.0;

/// Storage-condition-derived fitness of a batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityStatus {
    /// Not assessed yet.
    #[default]
    Unknown,
    Good,
    Poor,
    Critical,
}

impl QualityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityStatus::Unknown => "Unknown",
            QualityStatus::Good => "Good",
            QualityStatus::Poor => "Poor",
            QualityStatus::Critical => "Critical",
        }
    }

    /// Poor and Critical raise alerts; Good and Unknown don't.
    pub fn is_alerting(&self) -> bool {
        matches!(self, QualityStatus::Poor | QualityStatus::Critical)
    }
}

impl core::fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unknown" => Ok(QualityStatus::Unknown),
            "Good" => Ok(QualityStatus::Good),
            "Poor" => Ok(QualityStatus::Poor),
            "Critical" => Ok(QualityStatus::Critical),
            other => Err(DomainError::validation(format!("invalid quality status: {other}"))),
        }
    }
}

/// Derive the quality status of a reading.
///
/// Rules are checked in order, first match wins:
/// - too warm or too damp → `Poor`
/// - too cold or too dry → `Critical`
/// - otherwise → `Good`
///
/// Bounds are exclusive: exactly 30 °C or exactly 15 °C is still `Good`.
pub fn assess(reading: ConditionReading) -> QualityStatus {
    let ConditionReading { temperature, humidity } = reading;

    if temperature > MAX_TEMPERATURE_C || humidity > MAX_HUMIDITY_PCT {
        QualityStatus::Poor
    } else if temperature < MIN_TEMPERATURE_C || humidity < MIN_HUMIDITY_PCT {
        QualityStatus::Critical
    } else {
        QualityStatus::Good
    }
}
