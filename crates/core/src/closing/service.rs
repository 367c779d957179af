//! Stateless service building the monthly closing entry.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ledger::TransactionLine;

use super::error::ClosingError;
use super::types::{ClosingEntry, ClosingInputs};

/// Returns the last calendar day of the given month.
///
/// # Errors
///
/// Returns `InvalidMonth` if `month` is not in 1-12.
pub fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate, ClosingError> {
    if !(1..=12).contains(&month) {
        return Err(ClosingError::InvalidMonth(month));
    }
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .ok_or(ClosingError::InvalidMonth(month))
}

/// Builds the zeroing entry that moves income and expense balances into
/// capital. Pure logic; the books record the result through the ledger.
pub struct ClosingService;

impl ClosingService {
    /// Builds the balanced closing entry from current account balances.
    ///
    /// Each nonzero income account is debited for its full balance (driving
    /// it to zero), the expense account is credited for its full balance,
    /// and capital takes the difference: a credit for positive net income,
    /// a debit for a loss.
    ///
    /// # Errors
    ///
    /// Returns `NothingToClose` when both income and expense totals are
    /// zero.
    pub fn build_entry(inputs: &ClosingInputs) -> Result<ClosingEntry, ClosingError> {
        let interest_income = inputs
            .interest_income
            .map_or(Decimal::ZERO, |(_, balance)| balance);
        let investment_gain = inputs
            .investment_gains
            .map_or(Decimal::ZERO, |(_, balance)| balance);
        let total_expense = inputs
            .operating_expense
            .map_or(Decimal::ZERO, |(_, balance)| balance);

        let total_income = interest_income + investment_gain;
        if total_income.is_zero() && total_expense.is_zero() {
            return Err(ClosingError::NothingToClose);
        }
        let net_income = total_income - total_expense;

        let mut lines = Vec::new();
        if let Some((account_id, balance)) = inputs.interest_income {
            if !balance.is_zero() {
                lines.push(TransactionLine::debit(account_id, balance));
            }
        }
        if let Some((account_id, balance)) = inputs.investment_gains {
            if !balance.is_zero() {
                lines.push(TransactionLine::debit(account_id, balance));
            }
        }
        if let Some((account_id, balance)) = inputs.operating_expense {
            if !balance.is_zero() {
                lines.push(TransactionLine::credit(account_id, balance));
            }
        }
        if net_income > Decimal::ZERO {
            lines.push(TransactionLine::credit(inputs.capital, net_income));
        } else if net_income < Decimal::ZERO {
            lines.push(TransactionLine::debit(inputs.capital, -net_income));
        }

        Ok(ClosingEntry {
            lines,
            interest_income,
            investment_gain,
            total_income,
            total_expense,
            net_income,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use quipu_shared::types::AccountId;

    use crate::ledger::validate_lines;

    fn inputs(
        interest: Decimal,
        gains: Decimal,
        expense: Decimal,
    ) -> (ClosingInputs, AccountId) {
        let capital = AccountId::new();
        (
            ClosingInputs {
                interest_income: Some((AccountId::new(), interest)),
                investment_gains: Some((AccountId::new(), gains)),
                operating_expense: Some((AccountId::new(), expense)),
                capital,
            },
            capital,
        )
    }

    #[rstest]
    #[case(2026, 1, 31)]
    #[case(2026, 2, 28)]
    #[case(2024, 2, 29)]
    #[case(2026, 4, 30)]
    #[case(2026, 12, 31)]
    fn test_last_day_of_month(#[case] year: i32, #[case] month: u32, #[case] day: u32) {
        assert_eq!(
            last_day_of_month(year, month).unwrap(),
            NaiveDate::from_ymd_opt(year, month, day).unwrap()
        );
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn test_invalid_month(#[case] month: u32) {
        assert!(matches!(
            last_day_of_month(2026, month),
            Err(ClosingError::InvalidMonth(_))
        ));
    }

    #[test]
    fn test_positive_net_income_credits_capital() {
        let (inputs, capital) = inputs(dec!(50), dec!(0), dec!(20));
        let entry = ClosingService::build_entry(&inputs).unwrap();

        assert_eq!(entry.total_income, dec!(50));
        assert_eq!(entry.total_expense, dec!(20));
        assert_eq!(entry.net_income, dec!(30));

        // debit interest 50, credit expense 20, credit capital 30
        assert_eq!(entry.lines.len(), 3);
        let capital_line = entry
            .lines
            .iter()
            .find(|l| l.account_id == capital)
            .unwrap();
        assert_eq!(capital_line.credit, dec!(30));
        assert!(validate_lines(&entry.lines).is_ok());
    }

    #[test]
    fn test_loss_debits_capital() {
        let (inputs, capital) = inputs(dec!(10), dec!(0), dec!(25));
        let entry = ClosingService::build_entry(&inputs).unwrap();

        assert_eq!(entry.net_income, dec!(-15));
        let capital_line = entry
            .lines
            .iter()
            .find(|l| l.account_id == capital)
            .unwrap();
        assert_eq!(capital_line.debit, dec!(15));
        assert!(validate_lines(&entry.lines).is_ok());
    }

    #[test]
    fn test_break_even_skips_capital_line() {
        let (inputs, capital) = inputs(dec!(20), dec!(0), dec!(20));
        let entry = ClosingService::build_entry(&inputs).unwrap();

        assert_eq!(entry.net_income, Decimal::ZERO);
        assert!(entry.lines.iter().all(|l| l.account_id != capital));
        assert!(validate_lines(&entry.lines).is_ok());
    }

    #[test]
    fn test_nothing_to_close() {
        let (inputs, _) = inputs(dec!(0), dec!(0), dec!(0));
        assert!(matches!(
            ClosingService::build_entry(&inputs),
            Err(ClosingError::NothingToClose)
        ));
    }

    #[test]
    fn test_missing_accounts_contribute_zero() {
        let capital = AccountId::new();
        let inputs = ClosingInputs {
            interest_income: Some((AccountId::new(), dec!(40))),
            investment_gains: None,
            operating_expense: None,
            capital,
        };
        let entry = ClosingService::build_entry(&inputs).unwrap();

        assert_eq!(entry.investment_gain, Decimal::ZERO);
        assert_eq!(entry.net_income, dec!(40));
        assert_eq!(entry.lines.len(), 2);
        assert!(validate_lines(&entry.lines).is_ok());
    }
}
