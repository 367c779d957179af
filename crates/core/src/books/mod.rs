//! The books: one service object owning every collection.
//!
//! Constructed once per session and passed by reference wherever state is
//! needed, instead of a global mutable store. All money-moving operations
//! go through the transaction ledger held here; the credit and investment
//! managers never touch balances directly.

pub mod outcome;


use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use quipu_shared::types::{AccountId, ClosureId, CreditId, InvestmentId, PaymentId};

use crate::account::{names, Account, AccountError, AccountKind, AccountPatch, AccountRegistry};
use crate::closing::{
    last_day_of_month, AccountingClosure, ClosingError, ClosingInputs, ClosingService,
};
use crate::credit::{CloseCheck, Credit, CreditError, Payment};
use crate::investment::{Investment, InvestmentError, InvestmentPatch};
use crate::ledger::{LedgerError, Transaction, TransactionLedger, TransactionLine};

pub use outcome::{
    CreditDeleted, CreditGranted, InvestmentDeleted, InvestmentPurchased, InvestmentSold,
    PaymentRecorded, PeriodClosed, TransactionRecorded,
};

/// The in-memory state of the whole system: chart of accounts, transaction
/// log, credits, investments, and monthly closures.
///
/// Local mutation is synchronous and immediate; replication to a remote
/// store is layered on top (see the store crate) and never blocks or rolls
/// back an operation that already succeeded here.
#[derive(Debug, Clone, Default)]
pub struct Books {
    registry: AccountRegistry,
    ledger: TransactionLedger,
    credits: Vec<Credit>,
    investments: Vec<Investment>,
    closures: Vec<AccountingClosure>,
}

impl Books {
    /// Creates empty books.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates books from existing snapshots (bootstrap).
    #[must_use]
    pub fn from_snapshots(
        accounts: Vec<Account>,
        transactions: Vec<Transaction>,
        credits: Vec<Credit>,
        investments: Vec<Investment>,
        closures: Vec<AccountingClosure>,
    ) -> Self {
        Self {
            registry: AccountRegistry::from_accounts(accounts),
            ledger: TransactionLedger::from_transactions(transactions),
            credits,
            investments,
            closures,
        }
    }

    // ======================== Account Registry ========================

    /// Returns the chart of accounts.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        self.registry.accounts()
    }

    /// Finds an account by name.
    #[must_use]
    pub fn find_account_by_name(&self, name: &str) -> Option<&Account> {
        self.registry.find_by_name(name)
    }

    /// Finds an account by id.
    #[must_use]
    pub fn find_account(&self, id: AccountId) -> Option<&Account> {
        self.registry.find_by_id(id)
    }

    /// Creates an account with the given starting balance.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the name is taken.
    pub fn create_account(
        &mut self,
        name: impl Into<String>,
        kind: AccountKind,
        initial_balance: Decimal,
    ) -> Result<Account, AccountError> {
        self.registry.create(name, kind, initial_balance).cloned()
    }

    /// Applies a partial update to an account.
    ///
    /// A balance patch is a direct administrative overwrite; the normal
    /// ledger flow never uses it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `DuplicateName`.
    pub fn update_account(
        &mut self,
        id: AccountId,
        patch: AccountPatch,
    ) -> Result<Account, AccountError> {
        self.registry.update(id, patch)?;
        self.registry
            .find_by_id(id)
            .cloned()
            .ok_or(AccountError::NotFound(id))
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns `AccountInUse` if any transaction line references it, or
    /// `NotFound` if it does not exist.
    pub fn delete_account(&mut self, id: AccountId) -> Result<Account, AccountError> {
        if self.ledger.references_account(id) {
            return Err(AccountError::AccountInUse(id));
        }
        self.registry.remove(id)
    }

    // ======================== Transaction Ledger ========================

    /// Returns the transaction log in insertion order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    /// Returns transactions sorted newest first, for display.
    #[must_use]
    pub fn recent_transactions(&self) -> Vec<&Transaction> {
        self.ledger.recent()
    }

    /// Records a balanced transaction, applying balance deltas.
    ///
    /// # Errors
    ///
    /// Returns a `LedgerError` if validation fails or a line references a
    /// missing account; nothing is applied on error.
    pub fn record_transaction(
        &mut self,
        date: NaiveDate,
        description: impl Into<String>,
        lines: Vec<TransactionLine>,
    ) -> Result<TransactionRecorded, LedgerError> {
        let transaction = self
            .ledger
            .record(&mut self.registry, date, description, lines)?
            .clone();
        let touched_accounts = self.touched_by(&transaction);
        Ok(TransactionRecorded {
            transaction,
            touched_accounts,
        })
    }

    // ======================== Credit Manager ========================

    /// Returns all credits.
    #[must_use]
    pub fn credits(&self) -> &[Credit] {
        &self.credits
    }

    /// Finds a credit by id.
    #[must_use]
    pub fn find_credit(&self, id: CreditId) -> Option<&Credit> {
        self.credits.iter().find(|c| c.id == id)
    }

    /// Grants a credit to a client, funding it from a liquidity account.
    ///
    /// Records a funding transaction (debit Receivable, credit source);
    /// the credit is persisted only if the ledger accepts the entry.
    ///
    /// # Errors
    ///
    /// Returns `SourceAccountNotFound`, `InvalidSourceAccount`,
    /// `InvalidAmount`, `InsufficientFunds`, or a ledger error.
    pub fn grant_credit(
        &mut self,
        client_name: impl Into<String>,
        principal: Decimal,
        interest_rate: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
        source_account_id: AccountId,
    ) -> Result<CreditGranted, CreditError> {
        if principal <= Decimal::ZERO {
            return Err(CreditError::InvalidAmount);
        }
        let source = self
            .registry
            .find_by_id(source_account_id)
            .ok_or(CreditError::SourceAccountNotFound(source_account_id))?;
        if !source.is_liquidity() {
            return Err(CreditError::InvalidSourceAccount(source.name.clone()));
        }
        if source.balance < principal {
            return Err(CreditError::InsufficientFunds {
                required: principal,
                available: source.balance,
            });
        }

        let (receivable, created_accounts) =
            self.ensure_account(names::RECEIVABLE, AccountKind::Asset);

        let credit = Credit::granted(client_name, principal, interest_rate, start_date, end_date);
        let transaction = self
            .ledger
            .record(
                &mut self.registry,
                start_date,
                format!("Credit granted to {}", credit.client_name),
                vec![
                    TransactionLine::debit(receivable, principal),
                    TransactionLine::credit(source_account_id, principal),
                ],
            )?
            .clone();

        self.credits.push(credit.clone());
        let touched_accounts = self.touched_by(&transaction);
        Ok(CreditGranted {
            credit,
            transaction,
            touched_accounts,
            created_accounts,
        })
    }

    /// Records a payment against a credit.
    ///
    /// The payment is split into interest and principal portions by the
    /// original proportion and backed by a 3-line transaction: debit the
    /// source for the full amount, credit Receivable for the principal
    /// portion, credit Interest Income for the interest portion.
    ///
    /// # Errors
    ///
    /// Returns `CreditNotFound`, `AlreadyCompleted`, `InvalidAmount`,
    /// `SourceAccountNotFound`, `InvalidSourceAccount`, or a ledger error.
    pub fn record_payment(
        &mut self,
        credit_id: CreditId,
        amount: Decimal,
        date: NaiveDate,
        note: impl Into<String>,
        source_account_id: AccountId,
    ) -> Result<PaymentRecorded, CreditError> {
        if amount <= Decimal::ZERO {
            return Err(CreditError::InvalidAmount);
        }
        let index = self
            .credits
            .iter()
            .position(|c| c.id == credit_id)
            .ok_or(CreditError::CreditNotFound(credit_id))?;
        if !self.credits[index].status.accepts_payments() {
            return Err(CreditError::AlreadyCompleted);
        }
        let source = self
            .registry
            .find_by_id(source_account_id)
            .ok_or(CreditError::SourceAccountNotFound(source_account_id))?;
        if !source.is_liquidity() {
            return Err(CreditError::InvalidSourceAccount(source.name.clone()));
        }

        let (receivable, mut created_accounts) =
            self.ensure_account(names::RECEIVABLE, AccountKind::Asset);
        let (interest_income, created_income) =
            self.ensure_account(names::INTEREST_INCOME, AccountKind::Income);
        created_accounts.extend(created_income);

        let split = self.credits[index].split_payment(amount);
        let transaction = self
            .ledger
            .record(
                &mut self.registry,
                date,
                format!("Payment on credit of {}", self.credits[index].client_name),
                vec![
                    TransactionLine::debit(source_account_id, amount),
                    TransactionLine::credit(receivable, split.principal),
                    TransactionLine::credit(interest_income, split.interest),
                ],
            )?
            .clone();

        let payment = Payment {
            id: PaymentId::new(),
            credit_id,
            amount,
            date,
            note: note.into(),
        };
        self.credits[index].apply_payment(payment.clone());

        let touched_accounts = self.touched_by(&transaction);
        Ok(PaymentRecorded {
            credit: self.credits[index].clone(),
            payment,
            transaction,
            touched_accounts,
            created_accounts,
        })
    }

    /// Deletes a credit, permitted only while no payment has been
    /// recorded. The original funding is reversed through the ledger
    /// (debit Cash, credit Receivable) before the record is removed.
    ///
    /// # Errors
    ///
    /// Returns `CreditNotFound`, `CanOnlyDeleteApproved`, or a ledger
    /// error.
    pub fn delete_credit(&mut self, credit_id: CreditId) -> Result<CreditDeleted, CreditError> {
        let index = self
            .credits
            .iter()
            .position(|c| c.id == credit_id)
            .ok_or(CreditError::CreditNotFound(credit_id))?;
        if !self.credits[index].status.is_deletable() {
            return Err(CreditError::CanOnlyDeleteApproved);
        }

        let (cash, mut created_accounts) = self.ensure_account(names::CASH, AccountKind::Asset);
        let (receivable, created_receivable) =
            self.ensure_account(names::RECEIVABLE, AccountKind::Asset);
        created_accounts.extend(created_receivable);

        let principal = self.credits[index].principal;
        let transaction = self
            .ledger
            .record(
                &mut self.registry,
                Utc::now().date_naive(),
                format!(
                    "Credit to {} cancelled",
                    self.credits[index].client_name
                ),
                vec![
                    TransactionLine::debit(cash, principal),
                    TransactionLine::credit(receivable, principal),
                ],
            )?
            .clone();

        self.credits.remove(index);
        let touched_accounts = self.touched_by(&transaction);
        Ok(CreditDeleted {
            credit_id,
            transaction,
            touched_accounts,
            created_accounts,
        })
    }

    /// Checks whether a credit can be closed out (nothing remains due).
    ///
    /// # Errors
    ///
    /// Returns `CreditNotFound` if the credit does not exist.
    pub fn can_close_credit(&self, credit_id: CreditId) -> Result<CloseCheck, CreditError> {
        self.find_credit(credit_id)
            .map(Credit::can_close)
            .ok_or(CreditError::CreditNotFound(credit_id))
    }

    // ======================== Investment Manager ========================

    /// Returns all investments.
    #[must_use]
    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    /// Finds an investment by id.
    #[must_use]
    pub fn find_investment(&self, id: InvestmentId) -> Option<&Investment> {
        self.investments.iter().find(|i| i.id == id)
    }

    /// Purchases a resale asset from a liquidity account.
    ///
    /// Lazily creates the Investment Inventory account and records the
    /// purchase (debit Inventory, credit source).
    ///
    /// # Errors
    ///
    /// Returns `SourceAccountNotFound`, `InvalidSourceAccount`,
    /// `InvalidAmount`, `InsufficientFunds`, or a ledger error.
    pub fn purchase_investment(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        cost: Decimal,
        estimated_gain: Decimal,
        source_account_id: AccountId,
    ) -> Result<InvestmentPurchased, InvestmentError> {
        if cost <= Decimal::ZERO || estimated_gain < Decimal::ZERO {
            return Err(InvestmentError::InvalidAmount);
        }
        let source = self
            .registry
            .find_by_id(source_account_id)
            .ok_or(InvestmentError::SourceAccountNotFound(source_account_id))?;
        if !source.is_liquidity() {
            return Err(InvestmentError::InvalidSourceAccount(source.name.clone()));
        }
        if source.balance < cost {
            return Err(InvestmentError::InsufficientFunds {
                required: cost,
                available: source.balance,
            });
        }

        let (inventory, created_accounts) =
            self.ensure_account(names::INVESTMENT_INVENTORY, AccountKind::Asset);

        let investment = Investment::purchased(name, description, cost, estimated_gain);
        let transaction = self
            .ledger
            .record(
                &mut self.registry,
                Utc::now().date_naive(),
                format!("Investment purchased: {}", investment.name),
                vec![
                    TransactionLine::debit(inventory, cost),
                    TransactionLine::credit(source_account_id, cost),
                ],
            )?
            .clone();

        self.investments.push(investment.clone());
        let touched_accounts = self.touched_by(&transaction);
        Ok(InvestmentPurchased {
            investment,
            transaction,
            touched_accounts,
            created_accounts,
        })
    }

    /// Applies a partial update to an unsold investment.
    ///
    /// Returns `Ok(None)` as a silent no-op when the investment is sold.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the investment does not exist.
    pub fn update_investment(
        &mut self,
        id: InvestmentId,
        patch: InvestmentPatch,
    ) -> Result<Option<Investment>, InvestmentError> {
        let investment = self
            .investments
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(InvestmentError::NotFound(id))?;
        if investment.apply_patch(patch) {
            Ok(Some(investment.clone()))
        } else {
            Ok(None)
        }
    }

    /// Deletes an unsold investment, reversing the purchase (debit Cash,
    /// credit Inventory) before removing the record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AlreadySold`, or a ledger error.
    pub fn delete_investment(
        &mut self,
        id: InvestmentId,
    ) -> Result<InvestmentDeleted, InvestmentError> {
        let index = self
            .investments
            .iter()
            .position(|i| i.id == id)
            .ok_or(InvestmentError::NotFound(id))?;
        if self.investments[index].sold {
            return Err(InvestmentError::AlreadySold);
        }

        let (cash, mut created_accounts) = self.ensure_account(names::CASH, AccountKind::Asset);
        let (inventory, created_inventory) =
            self.ensure_account(names::INVESTMENT_INVENTORY, AccountKind::Asset);
        created_accounts.extend(created_inventory);

        let cost = self.investments[index].cost;
        let transaction = self
            .ledger
            .record(
                &mut self.registry,
                Utc::now().date_naive(),
                format!("Investment removed: {}", self.investments[index].name),
                vec![
                    TransactionLine::debit(cash, cost),
                    TransactionLine::credit(inventory, cost),
                ],
            )?
            .clone();

        self.investments.remove(index);
        let touched_accounts = self.touched_by(&transaction);
        Ok(InvestmentDeleted {
            investment_id: id,
            transaction,
            touched_accounts,
            created_accounts,
        })
    }

    /// Sells an investment into a liquidity account, locking the estimated
    /// gain in as realized.
    ///
    /// Records a 3-line transaction: debit the destination for the full
    /// total, credit Inventory for the cost, credit Investment Gains for
    /// the gain. If the ledger rejects the entry the in-memory sale is
    /// rolled back; the record never appears sold without a backing
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AlreadySold`, `DestinationAccountNotFound`,
    /// `InvalidDestinationAccount`, or a ledger error.
    pub fn sell_investment(
        &mut self,
        id: InvestmentId,
        destination_account_id: AccountId,
    ) -> Result<InvestmentSold, InvestmentError> {
        let index = self
            .investments
            .iter()
            .position(|i| i.id == id)
            .ok_or(InvestmentError::NotFound(id))?;
        if self.investments[index].sold {
            return Err(InvestmentError::AlreadySold);
        }
        let destination = self
            .registry
            .find_by_id(destination_account_id)
            .ok_or(InvestmentError::DestinationAccountNotFound(destination_account_id))?;
        if !destination.is_liquidity() {
            return Err(InvestmentError::InvalidDestinationAccount(
                destination.name.clone(),
            ));
        }

        let (inventory, mut created_accounts) =
            self.ensure_account(names::INVESTMENT_INVENTORY, AccountKind::Asset);
        let (gains, created_gains) =
            self.ensure_account(names::INVESTMENT_GAINS, AccountKind::Income);
        created_accounts.extend(created_gains);

        let today = Utc::now().date_naive();
        self.investments[index].mark_sold(today);

        let cost = self.investments[index].cost;
        let gain = self.investments[index].realized_gain;
        let recorded = self.ledger.record(
            &mut self.registry,
            today,
            format!("Investment sold: {}", self.investments[index].name),
            vec![
                TransactionLine::debit(destination_account_id, cost + gain),
                TransactionLine::credit(inventory, cost),
                TransactionLine::credit(gains, gain),
            ],
        );
        let transaction = match recorded {
            Ok(tx) => tx.clone(),
            Err(err) => {
                self.investments[index].roll_back_sale();
                return Err(err.into());
            }
        };

        let touched_accounts = self.touched_by(&transaction);
        Ok(InvestmentSold {
            investment: self.investments[index].clone(),
            transaction,
            touched_accounts,
            created_accounts,
        })
    }

    // ======================== Period Closing Engine ========================

    /// Returns all recorded closures.
    #[must_use]
    pub fn closures(&self) -> &[AccountingClosure] {
        &self.closures
    }

    /// Returns true if the given (month, year) has already been closed.
    #[must_use]
    pub fn is_closed(&self, month: u32, year: i32) -> bool {
        self.closures
            .iter()
            .any(|c| c.month == month && c.year == year)
    }

    /// Closes a calendar month: zeroes income and expense accounts into
    /// capital and records one closure per (month, year).
    ///
    /// The zeroing transaction is dated on the last calendar day of the
    /// month.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth`, `AlreadyClosed`, `CapitalAccountMissing`,
    /// `NothingToClose`, or a ledger error.
    pub fn close_period(&mut self, month: u32, year: i32) -> Result<PeriodClosed, ClosingError> {
        let date = last_day_of_month(year, month)?;
        if self.is_closed(month, year) {
            return Err(ClosingError::AlreadyClosed { month, year });
        }
        let capital = self
            .registry
            .find_by_name(names::CAPITAL)
            .map(|a| a.id)
            .ok_or(ClosingError::CapitalAccountMissing)?;

        let balance_of = |name: &str| -> Option<(AccountId, Decimal)> {
            self.registry.find_by_name(name).map(|a| (a.id, a.balance))
        };
        let inputs = ClosingInputs {
            interest_income: balance_of(names::INTEREST_INCOME),
            investment_gains: balance_of(names::INVESTMENT_GAINS),
            operating_expense: balance_of(names::OPERATING_EXPENSE),
            capital,
        };
        let entry = ClosingService::build_entry(&inputs)?;

        let transaction = self
            .ledger
            .record(
                &mut self.registry,
                date,
                format!("Monthly close {month}/{year}"),
                entry.lines.clone(),
            )?
            .clone();

        let closure = AccountingClosure {
            id: ClosureId::new(),
            month,
            year,
            date: Utc::now(),
            interest_income: entry.interest_income,
            investment_gain: entry.investment_gain,
            total_income: entry.total_income,
            total_expense: entry.total_expense,
            net_income: entry.net_income,
            transaction_id: transaction.id,
        };
        self.closures.push(closure.clone());

        let touched_accounts = self.touched_by(&transaction);
        Ok(PeriodClosed {
            closure,
            transaction,
            touched_accounts,
        })
    }

    // ======================== Snapshot replacement ========================

    /// Replaces the chart of accounts with a remote snapshot.
    pub fn replace_accounts(&mut self, accounts: Vec<Account>) {
        self.registry.replace(accounts);
    }

    /// Replaces the transaction log with a remote snapshot.
    pub fn replace_transactions(&mut self, transactions: Vec<Transaction>) {
        self.ledger.replace(transactions);
    }

    /// Replaces the credit collection with a remote snapshot.
    pub fn replace_credits(&mut self, credits: Vec<Credit>) {
        self.credits = credits;
    }

    /// Replaces the investment collection with a remote snapshot.
    pub fn replace_investments(&mut self, investments: Vec<Investment>) {
        self.investments = investments;
    }

    /// Replaces the closure collection with a remote snapshot.
    pub fn replace_closures(&mut self, closures: Vec<AccountingClosure>) {
        self.closures = closures;
    }

    // ======================== Helpers ========================

    /// Ensures a named account exists, reporting whether it was created.
    fn ensure_account(&mut self, name: &str, kind: AccountKind) -> (AccountId, Vec<Account>) {
        if let Some(account) = self.registry.find_by_name(name) {
            return (account.id, Vec::new());
        }
        let id = self.registry.ensure(name, kind);
        let created = self
            .registry
            .find_by_id(id)
            .cloned()
            .map_or_else(Vec::new, |a| vec![a]);
        (id, created)
    }

    /// Collects the post-transaction state of every account a transaction
    /// touched, without duplicates.
    fn touched_by(&self, transaction: &Transaction) -> Vec<Account> {
        let mut seen: Vec<AccountId> = Vec::new();
        let mut touched = Vec::new();
        for line in &transaction.lines {
            if seen.contains(&line.account_id) {
                continue;
            }
            seen.push(line.account_id);
            if let Some(account) = self.registry.find_by_id(line.account_id) {
                touched.push(account.clone());
            }
        }
        touched
    }
}
