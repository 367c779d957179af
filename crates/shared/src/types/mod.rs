//! Shared domain types.

pub mod id;

pub use id::{AccountId, ClosureId, CreditId, InvestmentId, PaymentId, TransactionId};
