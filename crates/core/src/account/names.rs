//! Well-known account names.
//!
//! The credit and investment managers, the period closing engine, and the
//! seed routine all address accounts by name. Centralizing the names keeps
//! the liquidity policy and lazy account creation in one place.

/// Capital account (credit-normal, absorbs net income at close).
pub const CAPITAL: &str = "Capital";
/// Income account for credit interest.
pub const INTEREST_INCOME: &str = "Interest Income";
/// Income account for realized investment gains.
pub const INVESTMENT_GAINS: &str = "Investment Gains";
/// Asset account tracking money owed by credit clients.
pub const RECEIVABLE: &str = "Receivable";
/// Cash on hand.
pub const CASH: &str = "Cash";
/// Bank account.
pub const BANK: &str = "Bank";
/// Asset account holding unsold resale inventory.
pub const INVESTMENT_INVENTORY: &str = "Investment Inventory";
/// Expense account for operating costs.
pub const OPERATING_EXPENSE: &str = "Operating Expense";
/// Liability account for money owed to suppliers.
pub const ACCOUNTS_PAYABLE: &str = "Accounts Payable";

/// The only accounts permitted as funding source/destination for credits
/// and investments.
pub const LIQUIDITY_ACCOUNTS: [&str; 2] = [CASH, BANK];

/// Returns true if the given account name is a liquidity account.
#[must_use]
pub fn is_liquidity(name: &str) -> bool {
    LIQUIDITY_ACCOUNTS.contains(&name)
}
