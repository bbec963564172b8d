//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Production lot identifier (e.g. `B123`).
///
/// Unique per drug row in storage; in memory uniqueness is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BatchNo(String);

impl BatchNo {
    /// Parse a batch number, trimming surrounding whitespace.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("BatchNo: cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for BatchNo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BatchNo {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for BatchNo {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BatchNo> for String {
    fn from(value: BatchNo) -> Self {
        value.0
    }
}

/// Identifier of an alert raised by a monitoring pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(Uuid);

impl AlertId {
    /// Time-ordered (UUIDv7), so alerts sort in the order they were raised.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for AlertId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Storage-assigned row identifiers (SQLite `INTEGER PRIMARY KEY`).
macro_rules! impl_row_id_newtype {
    ($t:ident, $name:literal) => {
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(i64);

        impl $t {
            pub fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = i64::from_str(s.trim())
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_row_id_newtype!(DrugId, "DrugId");
impl_row_id_newtype!(SupplierId, "SupplierId");
impl_row_id_newtype!(TransactionId, "TransactionId");
impl_row_id_newtype!(LogId, "LogId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_no_trims_and_rejects_blank() {
        assert_eq!(BatchNo::new("  B123 ").unwrap().as_str(), "B123");
        assert!(matches!(BatchNo::new("   "), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn batch_no_serde_validates() {
        let parsed: BatchNo = serde_json::from_str("\"B456\"").unwrap();
        assert_eq!(parsed.to_string(), "B456");
        assert!(serde_json::from_str::<BatchNo>("\"\"").is_err());
    }

    #[test]
    fn row_ids_parse_from_text() {
        assert_eq!("42".parse::<DrugId>().unwrap().get(), 42);
        assert!("forty-two".parse::<SupplierId>().is_err());
    }
}
