//! Investment error types.

use rust_decimal::Decimal;
use thiserror::Error;
use quipu_shared::types::{AccountId, InvestmentId};

use crate::ledger::LedgerError;

/// Errors that can occur during investment operations.
#[derive(Debug, Error)]
pub enum InvestmentError {
    /// Investment not found.
    #[error("Investment not found: {0}")]
    NotFound(InvestmentId),

    /// Funding source account not found.
    #[error("Source account not found: {0}")]
    SourceAccountNotFound(AccountId),

    /// Sale destination account not found.
    #[error("Destination account not found: {0}")]
    DestinationAccountNotFound(AccountId),

    /// Funding source violates the liquidity policy (must be Cash or Bank).
    #[error("Account '{0}' cannot fund investments; only Cash and Bank may")]
    InvalidSourceAccount(String),

    /// Sale destination violates the liquidity policy.
    #[error("Account '{0}' cannot receive sale proceeds; only Cash and Bank may")]
    InvalidDestinationAccount(String),

    /// Source balance below the purchase cost.
    #[error("Insufficient funds: {available} available, {required} required")]
    InsufficientFunds {
        /// Amount requested.
        required: Decimal,
        /// Balance available on the source account.
        available: Decimal,
    },

    /// Amount must be positive.
    #[error("Amount must be positive")]
    InvalidAmount,

    /// The investment was already sold.
    #[error("Investment is already sold")]
    AlreadySold,

    /// The backing ledger entry failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl InvestmentError {
    /// Returns the error code for logs and structured output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "INVESTMENT_NOT_FOUND",
            Self::SourceAccountNotFound(_) => "SOURCE_ACCOUNT_NOT_FOUND",
            Self::DestinationAccountNotFound(_) => "DESTINATION_ACCOUNT_NOT_FOUND",
            Self::InvalidSourceAccount(_) => "INVALID_SOURCE_ACCOUNT",
            Self::InvalidDestinationAccount(_) => "INVALID_DESTINATION_ACCOUNT",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::AlreadySold => "ALREADY_SOLD",
            Self::Ledger(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            InvestmentError::NotFound(InvestmentId::new()).error_code(),
            "INVESTMENT_NOT_FOUND"
        );
        assert_eq!(InvestmentError::AlreadySold.error_code(), "ALREADY_SOLD");
        assert_eq!(
            InvestmentError::InvalidDestinationAccount("Capital".into()).error_code(),
            "INVALID_DESTINATION_ACCOUNT"
        );
    }
}
