//! Inventory domain module for medicine batches.
//!
//! This crate contains the quality rules and record types, implemented purely as
//! deterministic domain logic (no IO, no storage).

pub mod medicine;
pub mod quality;
pub mod records;

pub use medicine::{ConditionReading, Medicine};
pub use quality::{QualityStatus, assess};
pub use records::{
    DrugStatus, MonitoringLogEntry, NewDrug, NewSupplier, NewTransaction, SupplyChainEntry,
    TransactionType,
};
