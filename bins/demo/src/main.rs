//! Quipu walkthrough binary.
//!
//! Bootstraps a session against the in-memory store, seeds the default
//! chart of accounts, and runs a full month of activity: a credit with a
//! payment, an investment bought and sold, and the monthly close.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quipu_core::account::names;
use quipu_shared::{AppConfig, AppError};
use quipu_store::{DocumentStore, EntityKind, MemoryStore, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quipu=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().map_err(AppError::from)?;
    info!(
        project = %config.store.project,
        collection_prefix = %config.store.collection_prefix,
        "configuration loaded"
    );

    let store = Arc::new(MemoryStore::new());
    let mut session = Session::bootstrap(store.clone(), &config)
        .await
        .map_err(AppError::from)?;
    info!(
        accounts = session.books().accounts().len(),
        "session bootstrapped"
    );

    let today = Utc::now().date_naive();
    let account_id = |session: &Session, name: &str| {
        session
            .books()
            .find_account_by_name(name)
            .map(|a| a.id)
            .ok_or_else(|| anyhow::anyhow!("account '{name}' missing"))
    };
    let cash = account_id(&session, names::CASH)?;

    // A credit: 200 at 10% over the term, paid in full.
    let credit = session.grant_credit(
        "Juan Pérez",
        dec!(200),
        dec!(10),
        today,
        today + chrono::Duration::days(180),
        cash,
    )?;
    info!(client = %credit.client_name, total_due = %credit.total_due, "credit granted");

    let credit = session.record_payment(credit.id, dec!(220), today, "Paid in full", cash)?;
    info!(status = ?credit.status, remaining = %credit.remaining, "payment recorded");

    // An investment: bought for 100, sold for 110.
    let investment =
        session.purchase_investment("Laptops", "Lot of 10 for resale", dec!(100), dec!(10), cash)?;
    info!(name = %investment.name, total = %investment.total, "investment purchased");

    let investment = session.sell_investment(investment.id, cash)?;
    info!(realized_gain = %investment.realized_gain, "investment sold");

    // Close the month: interest and gains move into capital.
    let closure = session.close_period(today.month(), today.year())?;
    info!(
        month = closure.month,
        year = closure.year,
        net_income = %closure.net_income,
        "period closed"
    );

    for account in session.books().accounts() {
        info!(name = %account.name, balance = %account.balance, "final balance");
    }

    // Let the fire-and-forget replication land, then show the store view.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    for kind in EntityKind::ALL {
        let count = store.list_all(kind).await?.len();
        info!(collection = %kind.collection(&config.store.collection_prefix), count, "store contents");
    }

    Ok(())
}
