//! Client loan (credit) lifecycle.
//!
//! This module defines the credit domain types, the payment split math,
//! and the status state machine. The stateful operations (grant, payment,
//! deletion) live on [`crate::books::Books`], which is the only component
//! allowed to touch the ledger.

pub mod error;
pub mod types;

pub use error::CreditError;
pub use types::{CloseCheck, Credit, CreditStatus, Payment, PaymentSplit};
