//! Persistence boundary for Quipu.
//!
//! This crate provides:
//! - The [`DocumentStore`] abstraction over a remote document database
//! - An in-memory backend for tests and offline use
//! - Fire-and-forget replication of local mutations
//! - The [`Session`] tying the in-memory books to a store
//!
//! The books in `quipu-core` are always the source of truth for the running
//! process: every mutation applies locally first and is mirrored to the
//! store afterwards without blocking. A replication failure is logged, never
//! surfaced to the caller, and never rolls back local state.

pub mod kind;
pub mod memory;
pub mod replicate;
pub mod seed;
pub mod session;
pub mod store;

mod error;

pub use error::StoreError;
pub use kind::{Document, EntityKind};
pub use memory::MemoryStore;
pub use session::Session;
pub use store::DocumentStore;
