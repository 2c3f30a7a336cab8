use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::tracking::LivePosition;
use crate::remote::{
    CollectionSnapshot, Document, DocumentStore, RealtimeFeed, RemoteError, TrackingEvent,
};

/// Document-store stand-in backed by process memory. Collections keep
/// insertion order, updates merge field-by-field, and every write publishes
/// the collection's full contents to its subscribers. Reads and writes can
/// be denied per collection path to exercise failure handling.
pub struct InMemoryRemote {
    collections: DashMap<String, Vec<(String, Document)>>,
    channels: DashMap<String, broadcast::Sender<CollectionSnapshot>>,
    denied_writes: DashMap<String, ()>,
    denied_reads: DashMap<String, ()>,
    fetch_calls: DashMap<String, u64>,
    live: DashMap<String, LivePosition>,
    live_tx: broadcast::Sender<TrackingEvent>,
    snapshot_buffer_size: usize,
}

impl InMemoryRemote {
    pub fn new(snapshot_buffer_size: usize, tracking_buffer_size: usize) -> Self {
        let (live_tx, _unused_rx) = broadcast::channel(tracking_buffer_size);

        Self {
            collections: DashMap::new(),
            channels: DashMap::new(),
            denied_writes: DashMap::new(),
            denied_reads: DashMap::new(),
            fetch_calls: DashMap::new(),
            live: DashMap::new(),
            live_tx,
            snapshot_buffer_size,
        }
    }

    pub fn deny_writes(&self, collection: &str) {
        self.denied_writes.insert(collection.to_string(), ());
    }

    pub fn allow_writes(&self, collection: &str) {
        self.denied_writes.remove(collection);
    }

    pub fn deny_reads(&self, collection: &str) {
        self.denied_reads.insert(collection.to_string(), ());
    }

    pub fn allow_reads(&self, collection: &str) {
        self.denied_reads.remove(collection);
    }

    /// Number of `fetch_all` calls seen for one collection path.
    pub fn fetch_count(&self, collection: &str) -> u64 {
        self.fetch_calls
            .get(collection)
            .map(|count| *count)
            .unwrap_or(0)
    }

    pub fn push_position(&self, vehicle_id: &str, position: LivePosition) {
        self.live.insert(vehicle_id.to_string(), position.clone());
        let _ = self.live_tx.send(TrackingEvent {
            vehicle_id: vehicle_id.to_string(),
            position,
        });
    }

    fn channel(&self, collection: &str) -> broadcast::Sender<CollectionSnapshot> {
        self.channels
            .entry(collection.to_string())
            .or_insert_with(|| broadcast::channel(self.snapshot_buffer_size).0)
            .clone()
    }

    fn publish(&self, collection: &str) {
        let docs = self
            .collections
            .get(collection)
            .map(|list| list.clone())
            .unwrap_or_default();

        let _ = self.channel(collection).send(CollectionSnapshot {
            collection: collection.to_string(),
            docs,
        });
    }

    fn check_writable(&self, collection: &str) -> Result<(), RemoteError> {
        if self.denied_writes.contains_key(collection) {
            return Err(RemoteError::Unavailable(collection.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryRemote {
    async fn create(&self, collection: &str, doc: Document) -> Result<String, RemoteError> {
        self.check_writable(collection)?;

        let id = Uuid::new_v4().to_string();
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), doc));

        self.publish(collection);
        Ok(id)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<(), RemoteError> {
        self.check_writable(collection)?;

        let mut list = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| RemoteError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        let doc = list
            .iter_mut()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(_, doc)| doc)
            .ok_or_else(|| RemoteError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        for (key, value) in patch {
            doc.insert(key, value);
        }
        drop(list);

        self.publish(collection);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), RemoteError> {
        self.check_writable(collection)?;

        let removed = self
            .collections
            .get_mut(collection)
            .map(|mut list| {
                let before = list.len();
                list.retain(|(doc_id, _)| doc_id != id);
                list.len() < before
            })
            .unwrap_or(false);

        if !removed {
            return Err(RemoteError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        self.publish(collection);
        Ok(())
    }

    async fn fetch_all(&self, collection: &str) -> Result<Vec<(String, Document)>, RemoteError> {
        *self
            .fetch_calls
            .entry(collection.to_string())
            .or_insert(0) += 1;

        if self.denied_reads.contains_key(collection) {
            return Err(RemoteError::Unavailable(collection.to_string()));
        }

        Ok(self
            .collections
            .get(collection)
            .map(|list| list.clone())
            .unwrap_or_default())
    }

    fn subscribe(&self, collection: &str) -> broadcast::Receiver<CollectionSnapshot> {
        self.channel(collection).subscribe()
    }
}

#[async_trait]
impl RealtimeFeed for InMemoryRemote {
    async fn fetch_all(&self) -> Result<Vec<(String, LivePosition)>, RemoteError> {
        Ok(self
            .live
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }

    fn subscribe(&self) -> broadcast::Receiver<TrackingEvent> {
        self.live_tx.subscribe()
    }
}
