//! Resale investment lifecycle.
//!
//! Domain types for purchased inventory intended for resale, including the
//! estimated-vs-realized gain rules. Stateful operations (purchase, sale,
//! deletion) live on [`crate::books::Books`].

pub mod error;
pub mod types;

pub use error::InvestmentError;
pub use types::{Investment, InvestmentPatch};
