//! Credit error types.

use rust_decimal::Decimal;
use thiserror::Error;
use quipu_shared::types::{AccountId, CreditId};

use crate::ledger::LedgerError;

/// Errors that can occur during credit operations.
#[derive(Debug, Error)]
pub enum CreditError {
    /// Credit not found.
    #[error("Credit not found: {0}")]
    CreditNotFound(CreditId),

    /// Funding source account not found.
    #[error("Source account not found: {0}")]
    SourceAccountNotFound(AccountId),

    /// Funding source violates the liquidity policy (must be Cash or Bank).
    #[error("Account '{0}' cannot fund credits; only Cash and Bank may")]
    InvalidSourceAccount(String),

    /// Source balance below the requested principal.
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

    /// The credit is already fully paid.
    #[error("Credit is already completed")]
    AlreadyCompleted,

    /// Deletion is only permitted before any payment is recorded.
    #[error("Can only delete credits in approved status")]
    CanOnlyDeleteApproved,

    /// The backing ledger entry failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl CreditError {
    /// Returns the error code for logs and structured output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CreditNotFound(_) => "CREDIT_NOT_FOUND",
            Self::SourceAccountNotFound(_) => "SOURCE_ACCOUNT_NOT_FOUND",
            Self::InvalidSourceAccount(_) => "INVALID_SOURCE_ACCOUNT",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::AlreadyCompleted => "ALREADY_COMPLETED",
            Self::CanOnlyDeleteApproved => "CAN_ONLY_DELETE_APPROVED",
            Self::Ledger(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CreditError::AlreadyCompleted.error_code(),
            "ALREADY_COMPLETED"
        );
        assert_eq!(
            CreditError::InvalidSourceAccount("Capital".into()).error_code(),
            "INVALID_SOURCE_ACCOUNT"
        );
        assert_eq!(
            CreditError::InsufficientFunds {
                required: dec!(100),
                available: dec!(50),
            }
            .error_code(),
            "INSUFFICIENT_FUNDS"
        );
        assert_eq!(
            CreditError::Ledger(LedgerError::EmptyTransaction).error_code(),
            "EMPTY_TRANSACTION"
        );
    }

    #[test]
    fn test_insufficient_funds_display() {
        let err = CreditError::InsufficientFunds {
            required: dec!(100),
            available: dec!(50),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: 50 available, 100 required"
        );
    }
}
