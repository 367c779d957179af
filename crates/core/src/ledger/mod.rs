//! Double-entry transaction ledger.
//!
//! This module implements the core ledger functionality:
//! - Transaction lines and the transaction aggregate
//! - Balance validation (debits = credits within tolerance)
//! - The append-only transaction log, sole mutator of account balances
//! - Error types for ledger operations

pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use service::TransactionLedger;
pub use types::{Transaction, TransactionLine};
pub use validation::{BALANCE_TOLERANCE, validate_lines};
