//! Account error types.

use thiserror::Error;
use quipu_shared::types::AccountId;

/// Errors that can occur during account registry operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// An account with this name already exists.
    #[error("Account name '{0}' already exists")]
    DuplicateName(String),

    /// Deletion blocked by transactions referencing the account.
    #[error("Account {0} is referenced by recorded transactions")]
    AccountInUse(AccountId),
}

impl AccountError {
    /// Returns the error code for logs and structured output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::DuplicateName(_) => "DUPLICATE_ACCOUNT_NAME",
            Self::AccountInUse(_) => "ACCOUNT_IN_USE",
        }
    }
}
