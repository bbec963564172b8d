//! Store configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File the store uses when no path is configured (relative to the working directory).
pub const DEFAULT_DB_FILE: &str = "drug_inventory.db";

/// What `log_reading` does when the batch number has no drug row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownBatchPolicy {
    /// Fail with `StoreError::UnknownBatch`; nothing is written.
    #[default]
    Reject,
    /// Write the row with a NULL `drug_id` and log a warning.
    Lenient,
}

/// Configuration of the SQLite-backed store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub unknown_batch: UnknownBatchPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            unknown_batch: UnknownBatchPolicy::default(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db_path(mut self, db_path: impl AsRef<Path>) -> Self {
        self.db_path = db_path.as_ref().to_path_buf();
        self
    }

    pub fn with_unknown_batch_policy(mut self, policy: UnknownBatchPolicy) -> Self {
        self.unknown_batch = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_file_in_working_directory() {
        let config = StoreConfig::default();
        assert_eq!(config.db_path, PathBuf::from("drug_inventory.db"));
        assert_eq!(config.unknown_batch, UnknownBatchPolicy::Reject);
    }

    #[test]
    fn deserializes_partial_config() {
        let config: StoreConfig = serde_json::from_str(r#"{ "unknown_batch": "lenient" }"#).unwrap();
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE));
        assert_eq!(config.unknown_batch, UnknownBatchPolicy::Lenient);
    }

    #[test]
    fn builder_overrides_fields() {
        let config = StoreConfig::new()
            .with_db_path("/tmp/inventory.db")
            .with_unknown_batch_policy(UnknownBatchPolicy::Lenient);
        assert_eq!(config.db_path, PathBuf::from("/tmp/inventory.db"));
        assert_eq!(config.unknown_batch, UnknownBatchPolicy::Lenient);
    }
}
