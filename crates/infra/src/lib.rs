//! Infrastructure layer: SQLite store, configuration, monitoring orchestration.

pub mod config;
pub mod monitoring;
pub mod persistence;

pub use config::{DEFAULT_DB_FILE, StoreConfig, UnknownBatchPolicy};
pub use monitoring::{MonitoringSystem, QualityAlert};
pub use persistence::{InMemoryReadingLog, LoggedReading, ReadingLog, SqliteStore, StoreError};
