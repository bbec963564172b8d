//! Persistence gateway for drugs, suppliers, supply-chain movements and monitoring logs.

pub mod in_memory;
pub(crate) mod schema;
pub mod sqlite;

pub use in_memory::{InMemoryReadingLog, LoggedReading};
pub use sqlite::SqliteStore;

use drugmon_core::{BatchNo, LogId};
use drugmon_inventory::{ConditionReading, QualityStatus};
use thiserror::Error;

/// Sink for monitoring observations.
///
/// The orchestrator only needs this one operation; the SQLite store is one
/// implementation, the in-memory log another.
pub trait ReadingLog {
    /// Persist one `(reading, status)` observation for `batch_no`.
    fn log_reading(
        &mut self,
        batch_no: &BatchNo,
        reading: ConditionReading,
        status: QualityStatus,
    ) -> Result<LogId, StoreError>;
}

/// Storage error.
///
/// Driver errors are carried unchanged in `Database` (constraint violations included).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("unknown batch number: {0}")]
    UnknownBatch(BatchNo),

    #[error("failed to start storage runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("undecodable value in store: {0}")]
    Decode(String),
}

impl StoreError {
    /// True for unique, check, not-null and foreign-key violations reported by the database.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            StoreError::Database(err) => err.as_database_error().is_some_and(|db| {
                matches!(
                    db.kind(),
                    sqlx::error::ErrorKind::UniqueViolation
                        | sqlx::error::ErrorKind::CheckViolation
                        | sqlx::error::ErrorKind::NotNullViolation
                        | sqlx::error::ErrorKind::ForeignKeyViolation
                )
            }),
            _ => false,
        }
    }
}
