//! Fire-and-forget replication of local mutations.
//!
//! Every local mutation is mirrored to the store on a spawned task. The
//! caller never waits for the write and never sees its error: a failed
//! replication is logged and the local state stands. Drift between memory
//! and the store is accepted until the next snapshot or restart.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::error;

use crate::kind::EntityKind;
use crate::store::DocumentStore;

/// Reports the backend-assigned id for a freshly created entity.
///
/// Creates are asynchronous, so the session learns external ids after the
/// fact through this ack and drains them before the next operation.
#[derive(Debug)]
pub struct RemoteIdAck {
    /// The collection the document was created in.
    pub kind: EntityKind,
    /// The entity uuid, as a string.
    pub entity_id: String,
    /// The backend-assigned document id.
    pub external_id: String,
}

/// Spawns replication tasks against a store and reports created ids back
/// over an unbounded channel.
#[derive(Clone)]
pub struct Replicator {
    store: Arc<dyn DocumentStore>,
    acks: mpsc::UnboundedSender<RemoteIdAck>,
}

impl Replicator {
    /// Creates a replicator and the ack receiver the owner should drain.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> (Self, mpsc::UnboundedReceiver<RemoteIdAck>) {
        let (acks, rx) = mpsc::unbounded_channel();
        (Self { store, acks }, rx)
    }

    /// Mirrors an entity creation. The external id comes back as an ack.
    pub fn create(&self, kind: EntityKind, entity_id: String, data: Value) {
        let store = Arc::clone(&self.store);
        let acks = self.acks.clone();
        tokio::spawn(async move {
            match store.create(kind, data).await {
                Ok(external_id) => {
                    // The receiver being gone just means the session ended.
                    let _ = acks.send(RemoteIdAck {
                        kind,
                        entity_id,
                        external_id,
                    });
                }
                Err(err) => {
                    error!(
                        kind = %kind,
                        entity_id = %entity_id,
                        error_code = err.error_code(),
                        "replication create failed: {err}"
                    );
                }
            }
        });
    }

    /// Mirrors a partial update to an existing document.
    pub fn update(&self, kind: EntityKind, external_id: String, patch: Value) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(err) = store.update(kind, &external_id, patch).await {
                error!(
                    kind = %kind,
                    external_id = %external_id,
                    error_code = err.error_code(),
                    "replication update failed: {err}"
                );
            }
        });
    }

    /// Mirrors a document deletion.
    pub fn delete(&self, kind: EntityKind, external_id: String) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(err) = store.delete(kind, &external_id).await {
                error!(
                    kind = %kind,
                    external_id = %external_id,
                    error_code = err.error_code(),
                    "replication delete failed: {err}"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_acks_external_id() {
        let store = Arc::new(MemoryStore::new());
        let (replicator, mut acks) = Replicator::new(store.clone());

        replicator.create(
            EntityKind::Accounts,
            "uuid-1".to_string(),
            json!({"name": "Cash"}),
        );

        let ack = acks.recv().await.unwrap();
        assert_eq!(ack.kind, EntityKind::Accounts);
        assert_eq!(ack.entity_id, "uuid-1");
        assert_eq!(store.list_all(EntityKind::Accounts).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_update_does_not_ack_or_panic() {
        let store = Arc::new(MemoryStore::new());
        let (replicator, mut acks) = Replicator::new(store);

        replicator.update(EntityKind::Accounts, "missing".to_string(), json!({}));

        // Give the spawned task a chance to run and fail quietly.
        tokio::task::yield_now().await;
        assert!(acks.try_recv().is_err());
    }
}
