//! Ledger domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use quipu_shared::types::{AccountId, TransactionId};

/// One line of a double-entry transaction.
///
/// Normally exactly one of debit/credit is nonzero per line; the sum
/// semantics do not enforce it but assume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLine {
    /// The account affected by this line.
    pub account_id: AccountId,
    /// Debit amount (>= 0).
    pub debit: Decimal,
    /// Credit amount (>= 0).
    pub credit: Decimal,
}

impl TransactionLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
        }
    }

    /// Returns true if both sides of the line are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }
}

/// A recorded double-entry transaction.
///
/// Immutable once created: the ledger is append-only and offers no update
/// or delete. Corrections are expressed as new reversing transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Business date of the transaction.
    pub date: NaiveDate,
    /// Human-readable description.
    pub description: String,
    /// The balanced lines, in the order they were given.
    pub lines: Vec<TransactionLine>,
    /// Sum of all debit amounts.
    pub total_debit: Decimal,
    /// Sum of all credit amounts.
    pub total_credit: Decimal,
    /// When the transaction was recorded.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns true if any line references the given account.
    #[must_use]
    pub fn references_account(&self, id: AccountId) -> bool {
        self.lines.iter().any(|line| line.account_id == id)
    }
}
