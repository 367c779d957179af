//! A running session: local books plus replication to a store.
//!
//! The session applies every mutation to the in-memory books first and
//! mirrors the outcome to the store afterwards, fire-and-forget. Local
//! success is final: a replication failure is logged and the caller still
//! gets `Ok`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use quipu_core::account::{Account, AccountError, AccountKind, AccountPatch};
use quipu_core::books::Books;
use quipu_core::closing::{AccountingClosure, ClosingError};
use quipu_core::credit::{CloseCheck, Credit, CreditError};
use quipu_core::investment::{Investment, InvestmentError, InvestmentPatch};
use quipu_core::ledger::{LedgerError, Transaction, TransactionLine};
use quipu_shared::types::{AccountId, CreditId, InvestmentId};
use quipu_shared::AppConfig;

use crate::error::StoreError;
use crate::kind::{Document, EntityKind};
use crate::replicate::{RemoteIdAck, Replicator};
use crate::seed;
use crate::store::DocumentStore;

/// Local books bound to a document store.
pub struct Session {
    books: Books,
    replicator: Replicator,
    acks: mpsc::UnboundedReceiver<RemoteIdAck>,
    /// (kind, entity uuid) -> backend document id, learned from acks and
    /// bootstrap loads.
    remote_ids: HashMap<(EntityKind, String), String>,
}

impl Session {
    /// Loads all collections from the store and builds the books.
    ///
    /// When the accounts collection is empty and seeding is enabled, the
    /// default chart of accounts is created locally and replicated out.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if a collection cannot be read or a document
    /// fails to deserialize.
    pub async fn bootstrap(
        store: Arc<dyn DocumentStore>,
        config: &AppConfig,
    ) -> Result<Self, StoreError> {
        let mut remote_ids = HashMap::new();

        let mut accounts: Vec<Account> = decode_collection(
            EntityKind::Accounts,
            store.list_all(EntityKind::Accounts).await?,
            &mut remote_ids,
        )?;
        let transactions: Vec<Transaction> = decode_collection(
            EntityKind::Transactions,
            store.list_all(EntityKind::Transactions).await?,
            &mut remote_ids,
        )?;
        let credits: Vec<Credit> = decode_collection(
            EntityKind::Credits,
            store.list_all(EntityKind::Credits).await?,
            &mut remote_ids,
        )?;
        let investments: Vec<Investment> = decode_collection(
            EntityKind::Investments,
            store.list_all(EntityKind::Investments).await?,
            &mut remote_ids,
        )?;
        let closures: Vec<AccountingClosure> = decode_collection(
            EntityKind::Closures,
            store.list_all(EntityKind::Closures).await?,
            &mut remote_ids,
        )?;

        let (replicator, acks) = Replicator::new(store);
        let mut session = Self {
            books: Books::from_snapshots(accounts.clone(), transactions, credits, investments, closures),
            replicator,
            acks,
            remote_ids,
        };

        if accounts.is_empty() && config.seed.on_bootstrap {
            accounts = seed::default_accounts();
            info!(count = accounts.len(), "seeding default chart of accounts");
            session.books.replace_accounts(accounts.clone());
            for account in &accounts {
                session.replicate_create(EntityKind::Accounts, account.id.to_string(), account);
            }
        }

        Ok(session)
    }

    /// Read access to the books.
    #[must_use]
    pub fn books(&self) -> &Books {
        &self.books
    }

    // ======================== Accounts ========================

    /// Creates an account and replicates it.
    ///
    /// # Errors
    ///
    /// Returns an `AccountError` from the books.
    pub fn create_account(
        &mut self,
        name: impl Into<String>,
        kind: AccountKind,
        initial_balance: Decimal,
    ) -> Result<Account, AccountError> {
        self.drain_acks();
        let account = self.books.create_account(name, kind, initial_balance)?;
        self.replicate_create(EntityKind::Accounts, account.id.to_string(), &account);
        Ok(account)
    }

    /// Updates an account and replicates the full record.
    ///
    /// # Errors
    ///
    /// Returns an `AccountError` from the books.
    pub fn update_account(
        &mut self,
        id: AccountId,
        patch: AccountPatch,
    ) -> Result<Account, AccountError> {
        self.drain_acks();
        let account = self.books.update_account(id, patch)?;
        self.replicate_full_update(EntityKind::Accounts, &id.to_string(), &account);
        Ok(account)
    }

    /// Deletes an account and its document.
    ///
    /// # Errors
    ///
    /// Returns an `AccountError` from the books.
    pub fn delete_account(&mut self, id: AccountId) -> Result<Account, AccountError> {
        self.drain_acks();
        let account = self.books.delete_account(id)?;
        self.replicate_delete(EntityKind::Accounts, &id.to_string());
        Ok(account)
    }

    // ======================== Transactions ========================

    /// Records a transaction and replicates it plus the touched balances.
    ///
    /// # Errors
    ///
    /// Returns a `LedgerError` from the books.
    pub fn record_transaction(
        &mut self,
        date: NaiveDate,
        description: impl Into<String>,
        lines: Vec<TransactionLine>,
    ) -> Result<Transaction, LedgerError> {
        self.drain_acks();
        let outcome = self.books.record_transaction(date, description, lines)?;
        self.mirror_transaction(&outcome.transaction, &outcome.touched_accounts, &[]);
        Ok(outcome.transaction)
    }

    // ======================== Credits ========================

    /// Grants a credit and replicates the credit, its funding transaction,
    /// and the touched balances.
    ///
    /// # Errors
    ///
    /// Returns a `CreditError` from the books.
    pub fn grant_credit(
        &mut self,
        client_name: impl Into<String>,
        principal: Decimal,
        interest_rate: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
        source_account_id: AccountId,
    ) -> Result<Credit, CreditError> {
        self.drain_acks();
        let outcome = self.books.grant_credit(
            client_name,
            principal,
            interest_rate,
            start_date,
            end_date,
            source_account_id,
        )?;
        self.replicate_create(
            EntityKind::Credits,
            outcome.credit.id.to_string(),
            &outcome.credit,
        );
        self.mirror_transaction(
            &outcome.transaction,
            &outcome.touched_accounts,
            &outcome.created_accounts,
        );
        Ok(outcome.credit)
    }

    /// Records a payment and replicates the credit, the backing
    /// transaction, and the touched balances.
    ///
    /// # Errors
    ///
    /// Returns a `CreditError` from the books.
    pub fn record_payment(
        &mut self,
        credit_id: CreditId,
        amount: Decimal,
        date: NaiveDate,
        note: impl Into<String>,
        source_account_id: AccountId,
    ) -> Result<Credit, CreditError> {
        self.drain_acks();
        let outcome = self
            .books
            .record_payment(credit_id, amount, date, note, source_account_id)?;
        self.replicate_full_update(EntityKind::Credits, &credit_id.to_string(), &outcome.credit);
        self.mirror_transaction(
            &outcome.transaction,
            &outcome.touched_accounts,
            &outcome.created_accounts,
        );
        Ok(outcome.credit)
    }

    /// Deletes a credit, replicating the reversal and removing the
    /// document.
    ///
    /// # Errors
    ///
    /// Returns a `CreditError` from the books.
    pub fn delete_credit(&mut self, credit_id: CreditId) -> Result<(), CreditError> {
        self.drain_acks();
        let outcome = self.books.delete_credit(credit_id)?;
        self.replicate_delete(EntityKind::Credits, &credit_id.to_string());
        self.mirror_transaction(
            &outcome.transaction,
            &outcome.touched_accounts,
            &outcome.created_accounts,
        );
        Ok(())
    }

    /// Checks whether a credit can be closed out.
    ///
    /// # Errors
    ///
    /// Returns `CreditNotFound` if the credit does not exist.
    pub fn can_close_credit(&self, credit_id: CreditId) -> Result<CloseCheck, CreditError> {
        self.books.can_close_credit(credit_id)
    }

    // ======================== Investments ========================

    /// Purchases an investment and replicates it plus the purchase
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an `InvestmentError` from the books.
    pub fn purchase_investment(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        cost: Decimal,
        estimated_gain: Decimal,
        source_account_id: AccountId,
    ) -> Result<Investment, InvestmentError> {
        self.drain_acks();
        let outcome = self.books.purchase_investment(
            name,
            description,
            cost,
            estimated_gain,
            source_account_id,
        )?;
        self.replicate_create(
            EntityKind::Investments,
            outcome.investment.id.to_string(),
            &outcome.investment,
        );
        self.mirror_transaction(
            &outcome.transaction,
            &outcome.touched_accounts,
            &outcome.created_accounts,
        );
        Ok(outcome.investment)
    }

    /// Updates an unsold investment; a sold one is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an `InvestmentError` from the books.
    pub fn update_investment(
        &mut self,
        id: InvestmentId,
        patch: InvestmentPatch,
    ) -> Result<Option<Investment>, InvestmentError> {
        self.drain_acks();
        let updated = self.books.update_investment(id, patch)?;
        if let Some(investment) = &updated {
            self.replicate_full_update(EntityKind::Investments, &id.to_string(), investment);
        }
        Ok(updated)
    }

    /// Deletes an unsold investment, replicating the reversal and
    /// removing the document.
    ///
    /// # Errors
    ///
    /// Returns an `InvestmentError` from the books.
    pub fn delete_investment(&mut self, id: InvestmentId) -> Result<(), InvestmentError> {
        self.drain_acks();
        let outcome = self.books.delete_investment(id)?;
        self.replicate_delete(EntityKind::Investments, &id.to_string());
        self.mirror_transaction(
            &outcome.transaction,
            &outcome.touched_accounts,
            &outcome.created_accounts,
        );
        Ok(())
    }

    /// Sells an investment and replicates the sale.
    ///
    /// # Errors
    ///
    /// Returns an `InvestmentError` from the books.
    pub fn sell_investment(
        &mut self,
        id: InvestmentId,
        destination_account_id: AccountId,
    ) -> Result<Investment, InvestmentError> {
        self.drain_acks();
        let outcome = self.books.sell_investment(id, destination_account_id)?;
        self.replicate_full_update(EntityKind::Investments, &id.to_string(), &outcome.investment);
        self.mirror_transaction(
            &outcome.transaction,
            &outcome.touched_accounts,
            &outcome.created_accounts,
        );
        Ok(outcome.investment)
    }

    // ======================== Period close ========================

    /// Closes a month and replicates the closure plus the zeroing
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns a `ClosingError` from the books.
    pub fn close_period(
        &mut self,
        month: u32,
        year: i32,
    ) -> Result<AccountingClosure, ClosingError> {
        self.drain_acks();
        let outcome = self.books.close_period(month, year)?;
        self.replicate_create(
            EntityKind::Closures,
            outcome.closure.id.to_string(),
            &outcome.closure,
        );
        self.mirror_transaction(&outcome.transaction, &outcome.touched_accounts, &[]);
        Ok(outcome.closure)
    }

    // ======================== Snapshots ========================

    /// Applies a full collection snapshot from the store, replacing the
    /// local collection wholesale (last write wins).
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if a document fails to deserialize; the
    /// local collection is left unchanged in that case.
    pub fn apply_snapshot(
        &mut self,
        kind: EntityKind,
        documents: Vec<Document>,
    ) -> Result<(), StoreError> {
        self.remote_ids.retain(|(k, _), _| *k != kind);
        match kind {
            EntityKind::Accounts => {
                let accounts = decode_collection(kind, documents, &mut self.remote_ids)?;
                self.books.replace_accounts(accounts);
            }
            EntityKind::Transactions => {
                let transactions = decode_collection(kind, documents, &mut self.remote_ids)?;
                self.books.replace_transactions(transactions);
            }
            EntityKind::Credits => {
                let credits = decode_collection(kind, documents, &mut self.remote_ids)?;
                self.books.replace_credits(credits);
            }
            EntityKind::Investments => {
                let investments = decode_collection(kind, documents, &mut self.remote_ids)?;
                self.books.replace_investments(investments);
            }
            EntityKind::Closures => {
                let closures = decode_collection(kind, documents, &mut self.remote_ids)?;
                self.books.replace_closures(closures);
            }
        }
        Ok(())
    }

    // ======================== Replication plumbing ========================

    /// Absorbs pending (entity uuid -> external id) acks.
    fn drain_acks(&mut self) {
        while let Ok(ack) = self.acks.try_recv() {
            self.remote_ids
                .insert((ack.kind, ack.entity_id), ack.external_id);
        }
    }

    fn replicate_create<T: Serialize>(&self, kind: EntityKind, entity_id: String, entity: &T) {
        match serde_json::to_value(entity) {
            Ok(data) => self.replicator.create(kind, entity_id, data),
            Err(err) => error!(kind = %kind, "entity serialization failed: {err}"),
        }
    }

    fn replicate_full_update<T: Serialize>(&self, kind: EntityKind, entity_id: &str, entity: &T) {
        let Some(external_id) = self.remote_ids.get(&(kind, entity_id.to_string())) else {
            // Ack not received yet; the next snapshot reconciles.
            warn!(kind = %kind, entity_id = %entity_id, "no document id yet, skipping update");
            return;
        };
        match serde_json::to_value(entity) {
            Ok(data) => self.replicator.update(kind, external_id.clone(), data),
            Err(err) => error!(kind = %kind, "entity serialization failed: {err}"),
        }
    }

    fn replicate_delete(&mut self, kind: EntityKind, entity_id: &str) {
        let Some(external_id) = self.remote_ids.remove(&(kind, entity_id.to_string())) else {
            warn!(kind = %kind, entity_id = %entity_id, "no document id yet, skipping delete");
            return;
        };
        self.replicator.delete(kind, external_id);
    }

    /// Mirrors a freshly recorded transaction: the transaction document,
    /// balance patches for touched accounts, and documents for accounts
    /// the operation lazily created.
    fn mirror_transaction(
        &self,
        transaction: &Transaction,
        touched_accounts: &[Account],
        created_accounts: &[Account],
    ) {
        self.replicate_create(
            EntityKind::Transactions,
            transaction.id.to_string(),
            transaction,
        );
        for account in created_accounts {
            self.replicate_create(EntityKind::Accounts, account.id.to_string(), account);
        }
        for account in touched_accounts {
            if created_accounts.iter().any(|c| c.id == account.id) {
                // The create already carries the post-transaction balance.
                continue;
            }
            let Some(external_id) = self
                .remote_ids
                .get(&(EntityKind::Accounts, account.id.to_string()))
            else {
                warn!(account_id = %account.id, "no document id yet, skipping balance update");
                continue;
            };
            self.replicator.update(
                EntityKind::Accounts,
                external_id.clone(),
                json!({ "balance": account.balance }),
            );
        }
    }
}

/// Deserializes a collection, recording each document's external id under
/// the entity uuid found in its `id` field.
fn decode_collection<T: DeserializeOwned>(
    kind: EntityKind,
    documents: Vec<Document>,
    remote_ids: &mut HashMap<(EntityKind, String), String>,
) -> Result<Vec<T>, StoreError> {
    let mut entities = Vec::with_capacity(documents.len());
    for document in documents {
        if let Some(entity_id) = document.data.get("id").and_then(Value::as_str) {
            remote_ids.insert((kind, entity_id.to_string()), document.external_id.clone());
        }
        entities.push(serde_json::from_value(document.data)?);
    }
    Ok(entities)
}
