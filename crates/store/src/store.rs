//! The document store abstraction.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::error::StoreError;
use crate::kind::{Document, EntityKind};

/// A remote document database holding one collection per [`EntityKind`].
///
/// Implementations assign their own document ids (the `external_id`),
/// independent of the entity uuids inside the documents. Updates are
/// shallow merges: fields present in the patch overwrite, everything else
/// is preserved.
///
/// `subscribe` yields full collection snapshots. Consumers replace their
/// local collection wholesale on each snapshot (last write wins); there is
/// no per-document diffing or conflict resolution.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document, returning the backend-assigned id.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend rejects the write.
    async fn create(&self, kind: EntityKind, data: Value) -> Result<String, StoreError>;

    /// Merges a partial document into an existing one.
    ///
    /// # Errors
    ///
    /// Returns `DocumentNotFound` if the id is unknown, or a backend error.
    async fn update(
        &self,
        kind: EntityKind,
        external_id: &str,
        patch: Value,
    ) -> Result<(), StoreError>;

    /// Deletes a document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentNotFound` if the id is unknown, or a backend error.
    async fn delete(&self, kind: EntityKind, external_id: &str) -> Result<(), StoreError>;

    /// Lists every document in a collection.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend read fails.
    async fn list_all(&self, kind: EntityKind) -> Result<Vec<Document>, StoreError>;

    /// Subscribes to full-collection snapshots for a kind.
    ///
    /// A snapshot is broadcast after every successful mutation of the
    /// collection. Slow receivers may miss intermediate snapshots; only the
    /// latest matters.
    fn subscribe(&self, kind: EntityKind) -> broadcast::Receiver<Vec<Document>>;
}
