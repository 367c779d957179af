//! The append-only transaction ledger.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use quipu_shared::types::{AccountId, TransactionId};

use crate::account::AccountRegistry;

use super::error::LedgerError;
use super::types::{Transaction, TransactionLine};
use super::validation::validate_lines;

/// The single point of truth for balance mutation.
///
/// Every money-moving operation in the system is expressed as one call to
/// [`TransactionLedger::record`]. Recorded transactions are never mutated
/// or removed; corrections are new reversing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionLedger {
    transactions: Vec<Transaction>,
}

impl TransactionLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger from an existing snapshot of transactions.
    #[must_use]
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Returns all transactions in insertion order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Returns transactions sorted by creation time, newest first.
    ///
    /// Derived read view for display; the log itself keeps insertion order.
    #[must_use]
    pub fn recent(&self) -> Vec<&Transaction> {
        let mut view: Vec<&Transaction> = self.transactions.iter().collect();
        view.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        view
    }

    /// Validates and records a balanced transaction, applying the
    /// normal-balance delta of each line to its account.
    ///
    /// This is the only path by which account balances change.
    ///
    /// # Errors
    ///
    /// Returns `Unbalanced`, `EmptyTransaction`, or `NegativeAmount` from
    /// validation, or `UnknownAccount` if a line references a missing
    /// account. On error nothing is applied.
    pub fn record(
        &mut self,
        registry: &mut AccountRegistry,
        date: NaiveDate,
        description: impl Into<String>,
        lines: Vec<TransactionLine>,
    ) -> Result<&Transaction, LedgerError> {
        validate_lines(&lines)?;

        for line in &lines {
            if !registry.contains(line.account_id) {
                return Err(LedgerError::UnknownAccount(line.account_id));
            }
        }

        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        for line in &lines {
            total_debit += line.debit;
            total_credit += line.credit;

            let kind = registry
                .find_by_id(line.account_id)
                .map(|a| a.kind)
                .ok_or(LedgerError::UnknownAccount(line.account_id))?;
            let delta = kind.normal_balance().balance_change(line.debit, line.credit);
            registry.apply_delta(line.account_id, delta);
        }

        self.transactions.push(Transaction {
            id: TransactionId::new(),
            date,
            description: description.into(),
            lines,
            total_debit,
            total_credit,
            created_at: Utc::now(),
        });
        let index = self.transactions.len() - 1;
        Ok(&self.transactions[index])
    }

    /// Returns true if any recorded transaction references the account.
    ///
    /// Used to block deletion of accounts that appear in the log.
    #[must_use]
    pub fn references_account(&self, id: AccountId) -> bool {
        self.transactions.iter().any(|t| t.references_account(id))
    }

    /// Replaces the whole log with a remote snapshot (last-write-wins).
    pub fn replace(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }
}
