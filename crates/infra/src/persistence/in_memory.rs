//! In-memory reading log for tests/dev.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use drugmon_core::{BatchNo, LogId};
use drugmon_inventory::{ConditionReading, QualityStatus};

use super::{ReadingLog, StoreError};

/// One observation captured by [`InMemoryReadingLog`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedReading {
    pub log_id: LogId,
    pub batch_no: BatchNo,
    pub reading: ConditionReading,
    pub quality_status: QualityStatus,
    pub recorded_at: DateTime<Utc>,
}

/// Reading log that keeps observations in insertion order.
///
/// By default every batch is accepted. `with_known_batches` restricts it to a fixed
/// set, mirroring the store's reject policy.
#[derive(Debug, Default)]
pub struct InMemoryReadingLog {
    entries: Vec<LoggedReading>,
    known_batches: Option<HashSet<BatchNo>>,
}

impl InMemoryReadingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_known_batches(batches: impl IntoIterator<Item = BatchNo>) -> Self {
        Self {
            entries: Vec::new(),
            known_batches: Some(batches.into_iter().collect()),
        }
    }

    pub fn entries(&self) -> &[LoggedReading] {
        &self.entries
    }

    /// Entries of one batch, oldest first.
    pub fn entries_for<'a>(&'a self, batch_no: &'a BatchNo) -> impl Iterator<Item = &'a LoggedReading> + 'a {
        self.entries.iter().filter(move |e| &e.batch_no == batch_no)
    }
}

impl ReadingLog for InMemoryReadingLog {
    fn log_reading(
        &mut self,
        batch_no: &BatchNo,
        reading: ConditionReading,
        status: QualityStatus,
    ) -> Result<LogId, StoreError> {
        if let Some(known) = &self.known_batches {
            if !known.contains(batch_no) {
                return Err(StoreError::UnknownBatch(batch_no.clone()));
            }
        }

        let log_id = LogId::from_raw(self.entries.len() as i64 + 1);
        self.entries.push(LoggedReading {
            log_id,
            batch_no: batch_no.clone(),
            reading,
            quality_status: status,
            recorded_at: Utc::now(),
        });
        Ok(log_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(s: &str) -> BatchNo {
        BatchNo::new(s).unwrap()
    }

    #[test]
    fn assigns_sequential_ids() {
        let mut log = InMemoryReadingLog::new();
        let r = ConditionReading::new(25.0, 50.0);
        let first = log.log_reading(&batch("B1"), r, QualityStatus::Unknown).unwrap();
        let second = log.log_reading(&batch("B2"), r, QualityStatus::Good).unwrap();

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries_for(&batch("B2")).count(), 1);
    }

    #[test]
    fn known_batches_reject_others() {
        let mut log = InMemoryReadingLog::with_known_batches([batch("B1")]);
        let r = ConditionReading::new(25.0, 50.0);

        assert!(log.log_reading(&batch("B1"), r, QualityStatus::Good).is_ok());
        let err = log
            .log_reading(&batch("B9"), r, QualityStatus::Good)
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownBatch(b) if b.as_str() == "B9"));
        assert_eq!(log.entries().len(), 1);
    }
}
