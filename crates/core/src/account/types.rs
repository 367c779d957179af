//! Account domain types and the normal-balance rule.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use quipu_shared::types::AccountId;

use super::names;

/// Account classification.
///
/// The kind determines the side on which the account naturally increases
/// (its normal balance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Asset account (debit-normal).
    Asset,
    /// Liability account (credit-normal).
    Liability,
    /// Income account (credit-normal).
    Income,
    /// Expense account (debit-normal).
    Expense,
    /// Capital account (credit-normal).
    Capital,
}

impl AccountKind {
    /// Returns the side on which this account kind naturally increases.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Income | Self::Capital => NormalBalance::Credit,
        }
    }
}

/// The side (debit/credit) on which an account type naturally increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal: balance += debit - credit.
    Debit,
    /// Credit-normal: balance += credit - debit.
    Credit,
}

impl NormalBalance {
    /// Calculates the balance delta a (debit, credit) pair applies to an
    /// account of this normal balance.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// A chart of accounts entry.
///
/// The balance is always the sum of applied transaction deltas since
/// creation; outside of administrative correction it is never written by
/// anything but the transaction ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Account name (unique within the chart).
    pub name: String,
    /// Account classification.
    pub kind: AccountKind,
    /// Current balance.
    pub balance: Decimal,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with the given starting balance.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: AccountKind, balance: Decimal) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            kind,
            balance,
            created_at: Utc::now(),
        }
    }

    /// Returns true if this account may fund or receive credit/investment
    /// money movements (policy: only Cash and Bank).
    #[must_use]
    pub fn is_liquidity(&self) -> bool {
        names::is_liquidity(&self.name)
    }
}

/// Partial update for an account.
///
/// A `balance` patch is a direct overwrite, allowed only for administrative
/// correction; the normal ledger flow never uses it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountPatch {
    /// New account name.
    pub name: Option<String>,
    /// New account kind.
    pub kind: Option<AccountKind>,
    /// Balance overwrite (administrative correction only).
    pub balance: Option<Decimal>,
}
