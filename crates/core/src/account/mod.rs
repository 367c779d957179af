//! Chart of accounts.
//!
//! This module implements the account registry:
//! - Account types and the normal-balance rule
//! - Well-known account names used by the credit/investment managers
//! - The registry holding the chart of accounts
//! - Error types for account operations

pub mod error;
pub mod names;
pub mod registry;
pub mod types;

pub use error::AccountError;
pub use registry::AccountRegistry;
pub use types::{Account, AccountKind, AccountPatch, NormalBalance};
