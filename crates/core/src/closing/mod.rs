//! Monthly period close.
//!
//! This module implements the period closing engine:
//! - The accounting closure record
//! - The stateless service building the balanced closing entry
//! - Error types for closing operations

pub mod error;
pub mod service;
pub mod types;

pub use error::ClosingError;
pub use service::{ClosingService, last_day_of_month};
pub use types::{AccountingClosure, ClosingEntry, ClosingInputs};
