//! Property-based tests for ledger validation and recording.

use proptest::prelude::*;
use rust_decimal::Decimal;

use quipu_shared::types::AccountId;

use crate::account::{AccountKind, AccountRegistry};

use super::service::TransactionLedger;
use super::types::TransactionLine;
use super::validation::validate_lines;

/// Strategy for positive amounts with two decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any generated pairing of equal debits and credits, validation
    /// accepts the lines.
    #[test]
    fn prop_mirrored_lines_always_balance(
        amounts in prop::collection::vec(amount_strategy(), 1..10)
    ) {
        let account = AccountId::new();
        let mut lines = Vec::new();
        for amount in amounts {
            lines.push(TransactionLine::debit(account, amount));
            lines.push(TransactionLine::credit(account, amount));
        }
        prop_assert!(validate_lines(&lines).is_ok());
    }

    /// Shifting one side beyond the tolerance always fails validation.
    #[test]
    fn prop_skewed_lines_are_rejected(
        amount in amount_strategy(),
        skew in 2i64..1_000i64,
    ) {
        let account = AccountId::new();
        let lines = vec![
            TransactionLine::debit(account, amount + Decimal::new(skew, 2)),
            TransactionLine::credit(account, amount),
        ];
        prop_assert!(validate_lines(&lines).is_err());
    }

    /// Replay invariant: for any sequence of recorded transactions,
    /// replaying every line from a zero balance reproduces each stored
    /// account balance exactly.
    #[test]
    fn prop_replay_reproduces_balances(
        amounts in prop::collection::vec(amount_strategy(), 1..20)
    ) {
        let mut registry = AccountRegistry::new();
        let cash = registry
            .create("Cash", AccountKind::Asset, Decimal::ZERO)
            .unwrap()
            .id;
        let income = registry
            .create("Interest Income", AccountKind::Income, Decimal::ZERO)
            .unwrap()
            .id;
        let mut ledger = TransactionLedger::new();

        let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        for amount in amounts {
            ledger
                .record(
                    &mut registry,
                    date,
                    "Interest received",
                    vec![
                        TransactionLine::debit(cash, amount),
                        TransactionLine::credit(income, amount),
                    ],
                )
                .unwrap();
        }

        for account in registry.accounts() {
            let replayed: Decimal = ledger
                .transactions()
                .iter()
                .flat_map(|t| t.lines.iter())
                .filter(|line| line.account_id == account.id)
                .map(|line| {
                    account
                        .kind
                        .normal_balance()
                        .balance_change(line.debit, line.credit)
                })
                .sum();
            prop_assert_eq!(replayed, account.balance);
        }
    }

    /// Every recorded transaction keeps total debits equal to total
    /// credits within the tolerance.
    #[test]
    fn prop_recorded_transactions_stay_balanced(
        amounts in prop::collection::vec(amount_strategy(), 1..20)
    ) {
        let mut registry = AccountRegistry::new();
        let cash = registry
            .create("Cash", AccountKind::Asset, Decimal::ZERO)
            .unwrap()
            .id;
        let capital = registry
            .create("Capital", AccountKind::Capital, Decimal::ZERO)
            .unwrap()
            .id;
        let mut ledger = TransactionLedger::new();

        let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        for amount in amounts {
            ledger
                .record(
                    &mut registry,
                    date,
                    "Contribution",
                    vec![
                        TransactionLine::debit(cash, amount),
                        TransactionLine::credit(capital, amount),
                    ],
                )
                .unwrap();
        }

        for tx in ledger.transactions() {
            prop_assert!((tx.total_debit - tx.total_credit).abs() <= super::validation::BALANCE_TOLERANCE);
        }
    }
}
