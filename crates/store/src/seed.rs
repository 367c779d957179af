//! Default chart of accounts seeded on first bootstrap.

use rust_decimal::Decimal;

use quipu_core::account::{names, Account, AccountKind};

/// Returns the default chart of accounts with its opening balances.
///
/// Seeded only when the accounts collection is empty at bootstrap; an
/// existing chart is never touched.
#[must_use]
pub fn default_accounts() -> Vec<Account> {
    let dec = |n: i64| Decimal::from(n);
    vec![
        Account::new(names::CAPITAL, AccountKind::Capital, dec(1000)),
        Account::new(names::INTEREST_INCOME, AccountKind::Income, Decimal::ZERO),
        Account::new(names::INVESTMENT_GAINS, AccountKind::Income, Decimal::ZERO),
        Account::new(names::RECEIVABLE, AccountKind::Asset, dec(400)),
        Account::new(names::CASH, AccountKind::Asset, dec(400)),
        Account::new(names::BANK, AccountKind::Asset, Decimal::ZERO),
        Account::new(
            names::INVESTMENT_INVENTORY,
            AccountKind::Asset,
            dec(200),
        ),
        Account::new(names::OPERATING_EXPENSE, AccountKind::Expense, Decimal::ZERO),
        Account::new(names::ACCOUNTS_PAYABLE, AccountKind::Liability, Decimal::ZERO),
    ]
}
