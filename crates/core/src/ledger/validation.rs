//! Business rule validation for ledger operations.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::TransactionLine;

/// Absolute tolerance within which total debits and credits must agree.
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Validates that a set of transaction lines forms a balanced entry.
///
/// Rules:
/// - at least one line must carry a nonzero amount
/// - no line may carry a negative amount
/// - |sum(debit) - sum(credit)| must be within [`BALANCE_TOLERANCE`]
///
/// # Errors
///
/// Returns an error if the lines violate any rule.
pub fn validate_lines(lines: &[TransactionLine]) -> Result<(), LedgerError> {
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut has_nonzero = false;

    for line in lines {
        if line.debit.is_sign_negative() || line.credit.is_sign_negative() {
            return Err(LedgerError::NegativeAmount);
        }
        if !line.is_zero() {
            has_nonzero = true;
        }
        total_debit += line.debit;
        total_credit += line.credit;
    }

    if !has_nonzero {
        return Err(LedgerError::EmptyTransaction);
    }

    if (total_debit - total_credit).abs() > BALANCE_TOLERANCE {
        return Err(LedgerError::Unbalanced {
            debit: total_debit,
            credit: total_credit,
        });
    }

    Ok(())
}
