//! Outcome types for book operations.
//!
//! Every mutating operation that touches more than one entity returns an
//! outcome listing all affected records, so the replication layer can
//! mirror each one to the remote store without diffing.

use crate::account::Account;
use crate::closing::AccountingClosure;
use crate::credit::{Credit, Payment};
use crate::investment::Investment;
use crate::ledger::Transaction;
use quipu_shared::types::{CreditId, InvestmentId};

/// Outcome of recording a raw transaction.
#[derive(Debug, Clone)]
pub struct TransactionRecorded {
    /// The recorded transaction.
    pub transaction: Transaction,
    /// Accounts whose balances changed, in their post-transaction state.
    pub touched_accounts: Vec<Account>,
}

/// Outcome of granting a credit.
#[derive(Debug, Clone)]
pub struct CreditGranted {
    /// The newly persisted credit.
    pub credit: Credit,
    /// The funding transaction.
    pub transaction: Transaction,
    /// Accounts whose balances changed.
    pub touched_accounts: Vec<Account>,
    /// Accounts lazily created by this operation.
    pub created_accounts: Vec<Account>,
}

/// Outcome of recording a credit payment.
#[derive(Debug, Clone)]
pub struct PaymentRecorded {
    /// The credit in its post-payment state.
    pub credit: Credit,
    /// The appended payment.
    pub payment: Payment,
    /// The backing transaction.
    pub transaction: Transaction,
    /// Accounts whose balances changed.
    pub touched_accounts: Vec<Account>,
    /// Accounts lazily created by this operation.
    pub created_accounts: Vec<Account>,
}

/// Outcome of deleting a credit.
#[derive(Debug, Clone)]
pub struct CreditDeleted {
    /// The removed credit's id.
    pub credit_id: CreditId,
    /// The reversing transaction.
    pub transaction: Transaction,
    /// Accounts whose balances changed.
    pub touched_accounts: Vec<Account>,
    /// Accounts lazily created by this operation.
    pub created_accounts: Vec<Account>,
}

/// Outcome of purchasing an investment.
#[derive(Debug, Clone)]
pub struct InvestmentPurchased {
    /// The newly persisted investment.
    pub investment: Investment,
    /// The purchase transaction.
    pub transaction: Transaction,
    /// Accounts whose balances changed.
    pub touched_accounts: Vec<Account>,
    /// Accounts lazily created by this operation.
    pub created_accounts: Vec<Account>,
}

/// Outcome of selling an investment.
#[derive(Debug, Clone)]
pub struct InvestmentSold {
    /// The investment in its post-sale state.
    pub investment: Investment,
    /// The sale transaction.
    pub transaction: Transaction,
    /// Accounts whose balances changed.
    pub touched_accounts: Vec<Account>,
    /// Accounts lazily created by this operation.
    pub created_accounts: Vec<Account>,
}

/// Outcome of deleting an investment.
#[derive(Debug, Clone)]
pub struct InvestmentDeleted {
    /// The removed investment's id.
    pub investment_id: InvestmentId,
    /// The reversing transaction.
    pub transaction: Transaction,
    /// Accounts whose balances changed.
    pub touched_accounts: Vec<Account>,
    /// Accounts lazily created by this operation.
    pub created_accounts: Vec<Account>,
}

/// Outcome of closing a period.
#[derive(Debug, Clone)]
pub struct PeriodClosed {
    /// The recorded closure.
    pub closure: AccountingClosure,
    /// The zeroing transaction.
    pub transaction: Transaction,
    /// Accounts whose balances changed.
    pub touched_accounts: Vec<Account>,
}
