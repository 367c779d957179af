//! Credit domain types and payment math.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use quipu_shared::types::{CreditId, PaymentId};

/// Credit status state machine.
///
/// `Approved -> InProgress -> Completed`, no transition back. A credit is
/// `InProgress` once any payment is recorded and `Completed` when nothing
/// remains due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditStatus {
    /// Granted, no payments recorded yet.
    Approved,
    /// At least one payment recorded.
    InProgress,
    /// Fully paid (terminal).
    Completed,
}

impl CreditStatus {
    /// Returns true if the credit may accept further payments.
    #[must_use]
    pub fn accepts_payments(&self) -> bool {
        !matches!(self, Self::Completed)
    }

    /// Returns true if the credit may be deleted.
    ///
    /// Deletion is permitted only before any payment is recorded.
    #[must_use]
    pub fn is_deletable(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// A payment recorded against a credit. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// The credit this payment belongs to.
    pub credit_id: CreditId,
    /// Amount paid.
    pub amount: Decimal,
    /// Payment date.
    pub date: NaiveDate,
    /// Free-form note.
    pub note: String,
}

/// A loan given to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credit {
    /// Unique identifier.
    pub id: CreditId,
    /// Name of the client.
    pub client_name: String,
    /// Principal lent out.
    pub principal: Decimal,
    /// Interest rate in percent over the whole term.
    pub interest_rate: Decimal,
    /// Total amount due: principal * (1 + rate/100).
    pub total_due: Decimal,
    /// Sum of recorded payments.
    pub paid: Decimal,
    /// Amount still due, clamped at zero.
    pub remaining: Decimal,
    /// Loan start date.
    pub start_date: NaiveDate,
    /// Agreed end date.
    pub end_date: NaiveDate,
    /// Current status.
    pub status: CreditStatus,
    /// Payments in the order they were recorded.
    pub payments: Vec<Payment>,
}

/// The interest/principal portions of a single payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentSplit {
    /// Portion of the payment attributed to interest income.
    pub interest: Decimal,
    /// Portion of the payment reducing the receivable principal.
    pub principal: Decimal,
}

/// Outcome of a `can_close` check.
#[derive(Debug, Clone)]
pub struct CloseCheck {
    /// True if nothing remains due.
    pub can_close: bool,
    /// Human-readable reason when the credit cannot be closed.
    pub reason: Option<String>,
}

impl Credit {
    /// Computes the total due for a principal at the given percent rate.
    #[must_use]
    pub fn total_due_for(principal: Decimal, interest_rate: Decimal) -> Decimal {
        principal + principal * interest_rate / Decimal::ONE_HUNDRED
    }

    /// Creates a freshly granted credit with no payments.
    #[must_use]
    pub fn granted(
        client_name: impl Into<String>,
        principal: Decimal,
        interest_rate: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        let total_due = Self::total_due_for(principal, interest_rate);
        Self {
            id: CreditId::new(),
            client_name: client_name.into(),
            principal,
            interest_rate,
            total_due,
            paid: Decimal::ZERO,
            remaining: total_due,
            start_date,
            end_date,
            status: CreditStatus::Approved,
            payments: Vec::new(),
        }
    }

    /// Splits a payment into interest and principal portions.
    ///
    /// Uses the single proportion derived from the original total
    /// (interest share = (total_due - principal) / total_due) for every
    /// payment. This is the given business behavior; it does not amortize
    /// a declining balance.
    #[must_use]
    pub fn split_payment(&self, amount: Decimal) -> PaymentSplit {
        if self.total_due.is_zero() {
            return PaymentSplit {
                interest: Decimal::ZERO,
                principal: amount,
            };
        }
        let interest = amount * (self.total_due - self.principal) / self.total_due;
        PaymentSplit {
            interest,
            principal: amount - interest,
        }
    }

    /// Applies a payment to the running totals and recomputes the status.
    ///
    /// Remaining is clamped at zero; once nothing remains the credit is
    /// `Completed`, otherwise any recorded payment makes it `InProgress`.
    pub fn apply_payment(&mut self, payment: Payment) {
        self.paid += payment.amount;
        self.remaining = (self.total_due - self.paid).max(Decimal::ZERO);
        self.payments.push(payment);

        if self.remaining <= Decimal::ZERO {
            self.status = CreditStatus::Completed;
            self.remaining = Decimal::ZERO;
        } else if !self.payments.is_empty() {
            self.status = CreditStatus::InProgress;
        }
    }

    /// Checks whether the credit can be closed out.
    #[must_use]
    pub fn can_close(&self) -> CloseCheck {
        if self.remaining <= Decimal::ZERO {
            CloseCheck {
                can_close: true,
                reason: None,
            }
        } else {
            CloseCheck {
                can_close: false,
                reason: Some(format!("{} remains due", self.remaining)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn test_credit(principal: Decimal, rate: Decimal) -> Credit {
        Credit::granted(
            "Juan Pérez",
            principal,
            rate,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 15).unwrap(),
        )
    }

    fn test_payment(credit: &Credit, amount: Decimal) -> Payment {
        Payment {
            id: PaymentId::new(),
            credit_id: credit.id,
            amount,
            date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
            note: "Payment".to_string(),
        }
    }

    #[rstest]
    #[case(dec!(200), dec!(10), dec!(220))]
    #[case(dec!(10000), dec!(10), dec!(11000))]
    #[case(dec!(5000), dec!(8), dec!(5400))]
    #[case(dec!(15000), dec!(12), dec!(16800))]
    #[case(dec!(100), dec!(0), dec!(100))]
    fn test_total_due(#[case] principal: Decimal, #[case] rate: Decimal, #[case] expected: Decimal) {
        assert_eq!(Credit::total_due_for(principal, rate), expected);
    }

    #[test]
    fn test_granted_credit_state() {
        let credit = test_credit(dec!(200), dec!(10));
        assert_eq!(credit.total_due, dec!(220));
        assert_eq!(credit.remaining, dec!(220));
        assert_eq!(credit.paid, Decimal::ZERO);
        assert_eq!(credit.status, CreditStatus::Approved);
        assert!(credit.payments.is_empty());
    }

    #[test]
    fn test_split_uses_original_proportion() {
        let credit = test_credit(dec!(200), dec!(10));

        // Interest share is 20/220 of every payment, regardless of how
        // much has already been paid.
        let split = credit.split_payment(dec!(110));
        assert_eq!(split.interest, dec!(10));
        assert_eq!(split.principal, dec!(100));
        assert_eq!(split.interest + split.principal, dec!(110));
    }

    #[test]
    fn test_split_sums_to_amount() {
        let credit = test_credit(dec!(5000), dec!(8));
        let split = credit.split_payment(dec!(1000));
        assert_eq!(split.interest + split.principal, dec!(1000));
    }

    #[test]
    fn test_partial_payment_moves_to_in_progress() {
        let mut credit = test_credit(dec!(200), dec!(10));
        let payment = test_payment(&credit, dec!(100));
        credit.apply_payment(payment);

        assert_eq!(credit.paid, dec!(100));
        assert_eq!(credit.remaining, dec!(120));
        assert_eq!(credit.status, CreditStatus::InProgress);
    }

    #[test]
    fn test_full_payment_completes() {
        let mut credit = test_credit(dec!(200), dec!(10));
        let payment = test_payment(&credit, dec!(220));
        credit.apply_payment(payment);

        assert_eq!(credit.remaining, Decimal::ZERO);
        assert_eq!(credit.status, CreditStatus::Completed);
        assert!(!credit.status.accepts_payments());
    }

    #[test]
    fn test_overpayment_clamps_remaining() {
        let mut credit = test_credit(dec!(200), dec!(10));
        let payment = test_payment(&credit, dec!(300));
        credit.apply_payment(payment);

        assert_eq!(credit.remaining, Decimal::ZERO);
        assert_eq!(credit.status, CreditStatus::Completed);
    }

    #[test]
    fn test_deletable_only_while_approved() {
        assert!(CreditStatus::Approved.is_deletable());
        assert!(!CreditStatus::InProgress.is_deletable());
        assert!(!CreditStatus::Completed.is_deletable());
    }

    #[test]
    fn test_can_close() {
        let mut credit = test_credit(dec!(200), dec!(10));
        let check = credit.can_close();
        assert!(!check.can_close);
        assert!(check.reason.unwrap().contains("220"));

        let payment = test_payment(&credit, dec!(220));
        credit.apply_payment(payment);
        let check = credit.can_close();
        assert!(check.can_close);
        assert!(check.reason.is_none());
    }
}
