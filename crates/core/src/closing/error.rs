//! Closing error types.

use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that can occur during a period close.
#[derive(Debug, Error)]
pub enum ClosingError {
    /// The period was already closed.
    #[error("Period {month}/{year} is already closed")]
    AlreadyClosed {
        /// Calendar month (1-12).
        month: u32,
        /// Calendar year.
        year: i32,
    },

    /// Neither income nor expense activity exists for the period.
    #[error("Nothing to close: income and expense balances are both zero")]
    NothingToClose,

    /// The capital account is missing from the chart.
    #[error("Capital account is missing")]
    CapitalAccountMissing,

    /// Month must be between 1 and 12.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// The backing ledger entry failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ClosingError {
    /// Returns the error code for logs and structured output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyClosed { .. } => "ALREADY_CLOSED",
            Self::NothingToClose => "NOTHING_TO_CLOSE",
            Self::CapitalAccountMissing => "CAPITAL_ACCOUNT_MISSING",
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::Ledger(err) => err.error_code(),
        }
    }
}
