//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;
use quipu_shared::types::AccountId;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Transaction is not balanced (debits != credits beyond tolerance).
    #[error("Transaction is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Transaction has no nonzero lines.
    #[error("Transaction must have at least one nonzero line")]
    EmptyTransaction,

    /// A line carries a negative amount.
    #[error("Line amounts cannot be negative")]
    NegativeAmount,

    /// A line references an account that does not exist.
    #[error("Unknown account: {0}")]
    UnknownAccount(AccountId),
}

impl LedgerError {
    /// Returns the error code for logs and structured output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unbalanced { .. } => "UNBALANCED_TRANSACTION",
            Self::EmptyTransaction => "EMPTY_TRANSACTION",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
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
            LedgerError::Unbalanced {
                debit: dec!(100),
                credit: dec!(50),
            }
            .error_code(),
            "UNBALANCED_TRANSACTION"
        );
        assert_eq!(
            LedgerError::EmptyTransaction.error_code(),
            "EMPTY_TRANSACTION"
        );
        assert_eq!(LedgerError::NegativeAmount.error_code(), "NEGATIVE_AMOUNT");
        assert_eq!(
            LedgerError::UnknownAccount(AccountId::new()).error_code(),
            "UNKNOWN_ACCOUNT"
        );
    }

    #[test]
    fn test_unbalanced_display() {
        let err = LedgerError::Unbalanced {
            debit: dec!(100.00),
            credit: dec!(50.00),
        };
        assert_eq!(
            err.to_string(),
            "Transaction is not balanced. Debit: 100.00, Credit: 50.00"
        );
    }
}
