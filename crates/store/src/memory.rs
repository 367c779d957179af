//! In-memory document store for tests and offline use.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{broadcast, RwLock};

use crate::error::StoreError;
use crate::kind::{Document, EntityKind};
use crate::store::DocumentStore;

const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

/// A [`DocumentStore`] backed by process memory.
///
/// Behaves like the real backend: assigns its own document ids, merges
/// updates shallowly, and broadcasts a full collection snapshot after each
/// mutation.
pub struct MemoryStore {
    collections: RwLock<HashMap<EntityKind, Vec<Document>>>,
    channels: HashMap<EntityKind, broadcast::Sender<Vec<Document>>>,
    next_id: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store with one snapshot channel per kind.
    #[must_use]
    pub fn new() -> Self {
        let channels = EntityKind::ALL
            .into_iter()
            .map(|kind| (kind, broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY).0))
            .collect();
        Self {
            collections: RwLock::new(HashMap::new()),
            channels,
            next_id: AtomicU64::new(1),
        }
    }

    fn assign_id(&self, kind: EntityKind) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", kind.as_str())
    }

    fn broadcast(&self, kind: EntityKind, snapshot: Vec<Document>) {
        if let Some(sender) = self.channels.get(&kind) {
            // No receivers is fine; snapshots are best effort.
            let _ = sender.send(snapshot);
        }
    }
}

/// Shallow merge: top-level fields of `patch` overwrite `target`.
fn merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target_map), Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                target_map.insert(key, value);
            }
        }
        (target, patch) => *target = patch,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, kind: EntityKind, data: Value) -> Result<String, StoreError> {
        let external_id = self.assign_id(kind);
        let mut collections = self.collections.write().await;
        let collection = collections.entry(kind).or_default();
        collection.push(Document {
            external_id: external_id.clone(),
            data,
        });
        let snapshot = collection.clone();
        drop(collections);
        self.broadcast(kind, snapshot);
        Ok(external_id)
    }

    async fn update(
        &self,
        kind: EntityKind,
        external_id: &str,
        patch: Value,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let collection = collections.entry(kind).or_default();
        let document = collection
            .iter_mut()
            .find(|d| d.external_id == external_id)
            .ok_or_else(|| StoreError::DocumentNotFound {
                kind,
                external_id: external_id.to_string(),
            })?;
        merge(&mut document.data, patch);
        let snapshot = collection.clone();
        drop(collections);
        self.broadcast(kind, snapshot);
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, external_id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let collection = collections.entry(kind).or_default();
        let index = collection
            .iter()
            .position(|d| d.external_id == external_id)
            .ok_or_else(|| StoreError::DocumentNotFound {
                kind,
                external_id: external_id.to_string(),
            })?;
        collection.remove(index);
        let snapshot = collection.clone();
        drop(collections);
        self.broadcast(kind, snapshot);
        Ok(())
    }

    async fn list_all(&self, kind: EntityKind) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&kind).cloned().unwrap_or_default())
    }

    fn subscribe(&self, kind: EntityKind) -> broadcast::Receiver<Vec<Document>> {
        self.channels
            .get(&kind)
            .map_or_else(|| broadcast::channel(1).1, broadcast::Sender::subscribe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store
            .create(EntityKind::Accounts, json!({"name": "Cash"}))
            .await
            .unwrap();
        let b = store
            .create(EntityKind::Accounts, json!({"name": "Bank"}))
            .await
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(store.list_all(EntityKind::Accounts).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_merges_shallowly() {
        let store = MemoryStore::new();
        let id = store
            .create(
                EntityKind::Accounts,
                json!({"name": "Cash", "balance": "100"}),
            )
            .await
            .unwrap();

        store
            .update(EntityKind::Accounts, &id, json!({"balance": "250"}))
            .await
            .unwrap();

        let docs = store.list_all(EntityKind::Accounts).await.unwrap();
        assert_eq!(docs[0].data["balance"], "250");
        assert_eq!(docs[0].data["name"], "Cash");
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() {
        let store = MemoryStore::new();
        let err = store
            .update(EntityKind::Accounts, "missing", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DocumentNotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_document() {
        let store = MemoryStore::new();
        let id = store
            .create(EntityKind::Credits, json!({"client": "Juan"}))
            .await
            .unwrap();

        store.delete(EntityKind::Credits, &id).await.unwrap();
        assert!(store.list_all(EntityKind::Credits).await.unwrap().is_empty());

        let err = store.delete(EntityKind::Credits, &id).await.unwrap_err();
        assert!(matches!(err, StoreError::DocumentNotFound { .. }));
    }

    #[tokio::test]
    async fn test_mutations_broadcast_snapshots() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe(EntityKind::Investments);

        store
            .create(EntityKind::Investments, json!({"name": "Laptops"}))
            .await
            .unwrap();

        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].data["name"], "Laptops");
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryStore::new();
        store
            .create(EntityKind::Accounts, json!({"name": "Cash"}))
            .await
            .unwrap();

        assert!(store.list_all(EntityKind::Credits).await.unwrap().is_empty());
    }
}
