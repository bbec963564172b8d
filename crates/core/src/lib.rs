//! `drugmon-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no IO).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{AlertId, BatchNo, DrugId, LogId, SupplierId, TransactionId};
pub use value_object::ValueObject;
