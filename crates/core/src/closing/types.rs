//! Closing domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use quipu_shared::types::{AccountId, ClosureId, TransactionId};

use crate::ledger::TransactionLine;

/// Record of a completed monthly close. One per (month, year), immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountingClosure {
    /// Unique identifier.
    pub id: ClosureId,
    /// Calendar month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// When the close was performed.
    pub date: DateTime<Utc>,
    /// Interest income zeroed into capital.
    pub interest_income: Decimal,
    /// Investment gains zeroed into capital.
    pub investment_gain: Decimal,
    /// interest_income + investment_gain.
    pub total_income: Decimal,
    /// Operating expense zeroed into capital.
    pub total_expense: Decimal,
    /// total_income - total_expense.
    pub net_income: Decimal,
    /// The zeroing transaction backing this closure.
    pub transaction_id: TransactionId,
}

/// Account balances feeding a close.
///
/// Income/expense accounts are optional: an account that was never created
/// simply contributes zero. The capital account is required.
#[derive(Debug, Clone)]
pub struct ClosingInputs {
    /// Interest Income account and its current balance.
    pub interest_income: Option<(AccountId, Decimal)>,
    /// Investment Gains account and its current balance.
    pub investment_gains: Option<(AccountId, Decimal)>,
    /// Operating Expense account and its current balance.
    pub operating_expense: Option<(AccountId, Decimal)>,
    /// Capital account receiving the net income.
    pub capital: AccountId,
}

/// A built (not yet recorded) closing entry with its totals.
#[derive(Debug, Clone)]
pub struct ClosingEntry {
    /// The balanced zeroing lines.
    pub lines: Vec<TransactionLine>,
    /// Interest income being closed.
    pub interest_income: Decimal,
    /// Investment gains being closed.
    pub investment_gain: Decimal,
    /// Total income being closed.
    pub total_income: Decimal,
    /// Total expense being closed.
    pub total_expense: Decimal,
    /// Net income moved into capital.
    pub net_income: Decimal,
}
