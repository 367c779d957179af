//! The account registry holding the chart of accounts.

use rust_decimal::Decimal;
use quipu_shared::types::AccountId;

use super::error::AccountError;
use super::types::{Account, AccountKind, AccountPatch};

/// Holds the chart of accounts in insertion order.
///
/// The registry never applies transaction deltas itself: `apply_delta` is
/// crate-private so that the transaction ledger is the only balance writer.
/// `update` allows a direct balance overwrite for administrative correction
/// only.
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from an existing snapshot of accounts.
    #[must_use]
    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// Returns all accounts in insertion order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Creates a new account and returns it.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if an account with the same name exists.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        kind: AccountKind,
        initial_balance: Decimal,
    ) -> Result<&Account, AccountError> {
        let name = name.into();
        if self.find_by_name(&name).is_some() {
            return Err(AccountError::DuplicateName(name));
        }
        self.accounts.push(Account::new(name, kind, initial_balance));
        let index = self.accounts.len() - 1;
        Ok(&self.accounts[index])
    }

    /// Ensures an account with the given name exists, creating it with a
    /// zero balance if absent. Idempotent; returns the account id.
    ///
    /// Used for lazy account creation by the credit and investment
    /// managers (Investment Inventory, Investment Gains).
    pub fn ensure(&mut self, name: &str, kind: AccountKind) -> AccountId {
        if let Some(account) = self.find_by_name(name) {
            return account.id;
        }
        self.accounts
            .push(Account::new(name.to_string(), kind, Decimal::ZERO));
        self.accounts[self.accounts.len() - 1].id
    }

    /// Applies a partial update to an account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist, or `DuplicateName`
    /// if renaming would collide with another account.
    pub fn update(&mut self, id: AccountId, patch: AccountPatch) -> Result<(), AccountError> {
        if let Some(new_name) = &patch.name {
            if self
                .accounts
                .iter()
                .any(|a| a.id != id && a.name == *new_name)
            {
                return Err(AccountError::DuplicateName(new_name.clone()));
            }
        }

        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(AccountError::NotFound(id))?;

        if let Some(name) = patch.name {
            account.name = name;
        }
        if let Some(kind) = patch.kind {
            account.kind = kind;
        }
        if let Some(balance) = patch.balance {
            account.balance = balance;
        }
        Ok(())
    }

    /// Removes an account. The caller (the books) is responsible for
    /// checking that no transaction references it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub fn remove(&mut self, id: AccountId) -> Result<Account, AccountError> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or(AccountError::NotFound(id))?;
        Ok(self.accounts.remove(index))
    }

    /// Finds an account by name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    /// Finds an account by id.
    #[must_use]
    pub fn find_by_id(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Returns true if an account with the given id exists.
    #[must_use]
    pub fn contains(&self, id: AccountId) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Applies a balance delta to an account.
    ///
    /// Crate-private: only the transaction ledger may move balances.
    pub(crate) fn apply_delta(&mut self, id: AccountId, delta: Decimal) {
        if let Some(account) = self.accounts.iter_mut().find(|a| a.id == id) {
            account.balance += delta;
        }
    }

    /// Replaces the whole chart with a remote snapshot (last-write-wins).
    pub fn replace(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_and_find() {
        let mut registry = AccountRegistry::new();
        let id = registry
            .create("Cash", AccountKind::Asset, dec!(400))
            .unwrap()
            .id;

        assert_eq!(registry.accounts().len(), 1);
        assert_eq!(registry.find_by_name("Cash").unwrap().id, id);
        assert_eq!(registry.find_by_id(id).unwrap().balance, dec!(400));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = AccountRegistry::new();
        registry.create("Cash", AccountKind::Asset, dec!(0)).unwrap();

        let err = registry
            .create("Cash", AccountKind::Asset, dec!(0))
            .unwrap_err();
        assert!(matches!(err, AccountError::DuplicateName(_)));
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let mut registry = AccountRegistry::new();
        let first = registry.ensure("Investment Gains", AccountKind::Income);
        let second = registry.ensure("Investment Gains", AccountKind::Income);

        assert_eq!(first, second);
        assert_eq!(registry.accounts().len(), 1);
        assert_eq!(
            registry.find_by_name("Investment Gains").unwrap().balance,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_update_patch() {
        let mut registry = AccountRegistry::new();
        let id = registry
            .create("Cassh", AccountKind::Liability, dec!(0))
            .unwrap()
            .id;

        registry
            .update(
                id,
                AccountPatch {
                    name: Some("Cash".to_string()),
                    kind: Some(AccountKind::Asset),
                    balance: Some(dec!(150)),
                },
            )
            .unwrap();

        let account = registry.find_by_id(id).unwrap();
        assert_eq!(account.name, "Cash");
        assert_eq!(account.kind, AccountKind::Asset);
        assert_eq!(account.balance, dec!(150));
    }

    #[test]
    fn test_update_missing_account() {
        let mut registry = AccountRegistry::new();
        let err = registry
            .update(AccountId::new(), AccountPatch::default())
            .unwrap_err();
        assert!(matches!(err, AccountError::NotFound(_)));
    }

    #[test]
    fn test_rename_collision_rejected() {
        let mut registry = AccountRegistry::new();
        registry.create("Cash", AccountKind::Asset, dec!(0)).unwrap();
        let id = registry
            .create("Bank", AccountKind::Asset, dec!(0))
            .unwrap()
            .id;

        let err = registry
            .update(
                id,
                AccountPatch {
                    name: Some("Cash".to_string()),
                    ..AccountPatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, AccountError::DuplicateName(_)));
    }

    #[test]
    fn test_remove() {
        let mut registry = AccountRegistry::new();
        let id = registry
            .create("Cash", AccountKind::Asset, dec!(0))
            .unwrap()
            .id;

        let removed = registry.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(registry.accounts().is_empty());
        assert!(matches!(
            registry.remove(id),
            Err(AccountError::NotFound(_))
        ));
    }

    #[test]
    fn test_apply_delta() {
        let mut registry = AccountRegistry::new();
        let id = registry
            .create("Cash", AccountKind::Asset, dec!(100))
            .unwrap()
            .id;

        registry.apply_delta(id, dec!(-40));
        assert_eq!(registry.find_by_id(id).unwrap().balance, dec!(60));
    }

    #[test]
    fn test_replace_snapshot() {
        let mut registry = AccountRegistry::new();
        registry.create("Cash", AccountKind::Asset, dec!(0)).unwrap();

        let snapshot = vec![Account::new("Bank", AccountKind::Asset, dec!(10))];
        registry.replace(snapshot);

        assert_eq!(registry.accounts().len(), 1);
        assert!(registry.find_by_name("Cash").is_none());
        assert!(registry.find_by_name("Bank").is_some());
    }
}
