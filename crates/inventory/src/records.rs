//! Persisted inventory records (drugs, suppliers, supply-chain movements, monitoring logs).
//!
//! These are plain data carriers. Constraints (unique batch number, unique email,
//! quantity checks) are enforced by the store, not here.

use core::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use drugmon_core::{BatchNo, DomainError, DrugId, LogId, SupplierId};

use crate::medicine::ConditionReading;
use crate::quality::QualityStatus;

/// Stock status of a drug row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrugStatus {
    InStock,
    OutOfStock,
    Expired,
}

impl DrugStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrugStatus::InStock => "In Stock",
            DrugStatus::OutOfStock => "Out of Stock",
            DrugStatus::Expired => "Expired",
        }
    }
}

impl core::fmt::Display for DrugStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrugStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "In Stock" => Ok(DrugStatus::InStock),
            "Out of Stock" => Ok(DrugStatus::OutOfStock),
            "Expired" => Ok(DrugStatus::Expired),
            other => Err(DomainError::validation(format!("invalid drug status: {other}"))),
        }
    }
}

/// Direction of a supply-chain movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Received,
    Distributed,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Received => "Received",
            TransactionType::Distributed => "Distributed",
        }
    }
}

impl core::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Received" => Ok(TransactionType::Received),
            "Distributed" => Ok(TransactionType::Distributed),
            other => Err(DomainError::validation(format!(
                "invalid transaction type: {other}"
            ))),
        }
    }
}

/// Input for a new supplier row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// Input for a new drug row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDrug {
    pub name: String,
    pub batch_no: BatchNo,
    pub supplier_id: Option<SupplierId>,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
    pub location: String,
    pub status: DrugStatus,
}

/// Input for a new supply-chain transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub drug_id: DrugId,
    pub supplier_id: SupplierId,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    /// Defaults to the time of insertion.
    pub occurred_at: Option<DateTime<Utc>>,
    pub destination: Option<String>,
}

/// Row of the supply-chain activity read model (transaction joined to its drug).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyChainEntry {
    pub drug_name: String,
    pub transaction_date: DateTime<Utc>,
    pub quantity: i64,
    pub transaction_type: TransactionType,
}

/// A persisted monitoring observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringLogEntry {
    pub log_id: LogId,
    /// `None` only for rows written under the lenient unknown-batch policy.
    pub drug_id: Option<DrugId>,
    pub reading: ConditionReading,
    pub quality_status: QualityStatus,
    pub recorded_at: DateTime<Utc>,
}
