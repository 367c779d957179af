//! Core accounting logic for Quipu.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `account` - Chart of accounts and the normal-balance rule
//! - `ledger` - Double-entry transaction log, the sole mutator of balances
//! - `credit` - Client loan lifecycle (grant, payments, closure)
//! - `investment` - Resale inventory lifecycle (purchase, sale, gains)
//! - `closing` - Monthly period close into capital
//! - `books` - The service object owning all collections

pub mod account;
pub mod books;
pub mod closing;
pub mod credit;
pub mod investment;
pub mod ledger;
