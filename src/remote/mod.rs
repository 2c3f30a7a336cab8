pub mod memory;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::models::tracking::LivePosition;

/// Body of a remote document. The document id is the remote store's key and
/// is never stored inside the body.
pub type Document = serde_json::Map<String, serde_json::Value>;

pub mod collections {
    pub const VEHICLES: &str = "vehicles";
    pub const DRIVERS: &str = "drivers";
    pub const TRIPS: &str = "trips";
    pub const SERVICE_LOGS: &str = "serviceLogs";
    pub const EXPENSES: &str = "expenses";
    pub const MONTHLY_FINANCIALS: &str = "monthlyFinancials";
    pub const FUEL_EFFICIENCY: &str = "fuelEfficiency";

    pub fn driver_complaints(driver_id: &str) -> String {
        format!("{DRIVERS}/{driver_id}/complaints")
    }

    pub fn driver_performance(driver_id: &str) -> String {
        format!("{DRIVERS}/{driver_id}/performanceHistory")
    }
}

#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    #[error("document {id} not found in {collection}")]
    NotFound { collection: String, id: String },

    #[error("collection {0} unavailable")]
    Unavailable(String),

    #[error("document decode failed: {0}")]
    Decode(String),
}

/// Full current contents of one collection, in remote order.
#[derive(Debug, Clone)]
pub struct CollectionSnapshot {
    pub collection: String,
    pub docs: Vec<(String, Document)>,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create(&self, collection: &str, doc: Document) -> Result<String, RemoteError>;

    /// Partial-field update: keys present in `patch` replace the stored
    /// values, everything else is untouched.
    async fn update(&self, collection: &str, id: &str, patch: Document)
    -> Result<(), RemoteError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), RemoteError>;

    async fn fetch_all(&self, collection: &str) -> Result<Vec<(String, Document)>, RemoteError>;

    /// Push subscription: every change to the collection delivers its full
    /// current contents. Subscriptions do not replay history.
    fn subscribe(&self, collection: &str) -> broadcast::Receiver<CollectionSnapshot>;
}

#[derive(Debug, Clone)]
pub struct TrackingEvent {
    pub vehicle_id: String,
    pub position: LivePosition,
}

#[async_trait]
pub trait RealtimeFeed: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<(String, LivePosition)>, RemoteError>;

    fn subscribe(&self) -> broadcast::Receiver<TrackingEvent>;
}

pub fn to_document<T: Serialize>(value: &T) -> Result<Document, RemoteError> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(mut map)) => {
            map.remove("id");
            Ok(map)
        }
        Ok(other) => Err(RemoteError::Decode(format!("expected an object, got {other}"))),
        Err(err) => Err(RemoteError::Decode(err.to_string())),
    }
}

pub fn from_document<T: DeserializeOwned>(id: &str, doc: &Document) -> Result<T, RemoteError> {
    let mut map = doc.clone();
    map.insert("id".to_string(), serde_json::Value::String(id.to_string()));
    serde_json::from_value(serde_json::Value::Object(map))
        .map_err(|err| RemoteError::Decode(err.to_string()))
}
