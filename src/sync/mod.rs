mod drivers;

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::FleetError;
use crate::models::driver::Driver;
use crate::models::expense::Expense;
use crate::models::finance::{FuelEfficiencyEntry, MonthlyFinancial};
use crate::models::service_log::ServiceLog;
use crate::models::trip::Trip;
use crate::models::vehicle::Vehicle;
use crate::policy::Session;
use crate::remote::{Document, DocumentStore, collections, from_document};
use crate::store::FleetStore;

pub struct FleetSync;

/// Active subscription channels. Dropping the handle leaks the tasks; call
/// `stop` on sign-out.
pub struct SyncHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl FleetSync {
    /// Opens exactly one push subscription per collection, after priming
    /// each list with a full read (subscriptions do not replay, and the
    /// session may start long after the collections were written).
    /// Requires a verified session.
    pub fn start(
        store: Arc<FleetStore>,
        remote: Arc<dyn DocumentStore>,
        session: &Session,
    ) -> Result<SyncHandle, FleetError> {
        if !session.email_verified {
            return Err(FleetError::SessionNotVerified);
        }

        info!(user_id = %session.user_id, "fleet sync started");

        let tasks = vec![
            spawn_collection::<Vehicle>(
                store.clone(),
                remote.clone(),
                collections::VEHICLES,
                FleetStore::apply_vehicles,
            ),
            spawn_drivers(store.clone(), remote.clone()),
            spawn_collection::<Trip>(
                store.clone(),
                remote.clone(),
                collections::TRIPS,
                FleetStore::apply_trips,
            ),
            spawn_collection::<ServiceLog>(
                store.clone(),
                remote.clone(),
                collections::SERVICE_LOGS,
                FleetStore::apply_service_logs,
            ),
            spawn_collection::<Expense>(
                store.clone(),
                remote.clone(),
                collections::EXPENSES,
                FleetStore::apply_expenses,
            ),
            spawn_collection::<MonthlyFinancial>(
                store.clone(),
                remote.clone(),
                collections::MONTHLY_FINANCIALS,
                FleetStore::apply_monthly_financials,
            ),
            spawn_collection::<FuelEfficiencyEntry>(
                store.clone(),
                remote,
                collections::FUEL_EFFICIENCY,
                FleetStore::apply_fuel_efficiency,
            ),
        ];

        Ok(SyncHandle { tasks })
    }
}

impl SyncHandle {
    /// Closes all channels; remote changes are no longer reflected until a
    /// new sync is started.
    pub fn stop(self) {
        for task in self.tasks {
            task.abort();
        }
        info!("fleet sync stopped");
    }
}

fn spawn_collection<T>(
    store: Arc<FleetStore>,
    remote: Arc<dyn DocumentStore>,
    collection: &'static str,
    apply: fn(&FleetStore, Vec<T>),
) -> JoinHandle<()>
where
    T: DeserializeOwned + Send + 'static,
{
    tokio::spawn(async move {
        let mut rx = remote.subscribe(collection);

        match remote.fetch_all(collection).await {
            Ok(docs) => apply_snapshot(&store, collection, docs, apply),
            Err(err) => {
                warn!(collection, error = %err, "initial read failed; waiting for first snapshot")
            }
        }

        loop {
            match rx.recv().await {
                Ok(snapshot) => apply_snapshot(&store, collection, snapshot.docs, apply),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(collection, skipped, "subscription lagged; next snapshot carries full state");
                }
                Err(RecvError::Closed) => {
                    warn!(collection, "subscription closed");
                    break;
                }
            }
        }
    })
}

fn apply_snapshot<T>(
    store: &FleetStore,
    collection: &str,
    docs: Vec<(String, Document)>,
    apply: fn(&FleetStore, Vec<T>),
) where
    T: DeserializeOwned,
{
    let rows = decode_rows(collection, &docs);
    apply(store, rows);
    store
        .metrics()
        .snapshots_applied_total
        .with_label_values(&[collection])
        .inc();
}

fn spawn_drivers(store: Arc<FleetStore>, remote: Arc<dyn DocumentStore>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let collection = collections::DRIVERS;
        let mut rx = remote.subscribe(collection);

        match remote.fetch_all(collection).await {
            Ok(docs) => apply_driver_snapshot(&store, &remote, docs).await,
            Err(err) => {
                warn!(collection, error = %err, "initial read failed; waiting for first snapshot")
            }
        }

        loop {
            match rx.recv().await {
                Ok(snapshot) => apply_driver_snapshot(&store, &remote, snapshot.docs).await,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(collection, skipped, "subscription lagged; next snapshot carries full state");
                }
                Err(RecvError::Closed) => {
                    warn!(collection, "subscription closed");
                    break;
                }
            }
        }
    })
}

/// The driver list is applied only after every nested read in the batch has
/// settled.
async fn apply_driver_snapshot(
    store: &FleetStore,
    remote: &Arc<dyn DocumentStore>,
    docs: Vec<(String, Document)>,
) {
    let rows = decode_rows::<Driver>(collections::DRIVERS, &docs);

    let start = Instant::now();
    let hydrated = drivers::hydrate(remote.clone(), rows, store.metrics()).await;
    store
        .metrics()
        .driver_hydration_seconds
        .observe(start.elapsed().as_secs_f64());

    store.apply_drivers(hydrated);
    store
        .metrics()
        .snapshots_applied_total
        .with_label_values(&[collections::DRIVERS])
        .inc();
}

fn decode_rows<T: DeserializeOwned>(collection: &str, docs: &[(String, Document)]) -> Vec<T> {
    let mut rows = Vec::with_capacity(docs.len());
    for (id, doc) in docs {
        match from_document::<T>(id, doc) {
            Ok(row) => rows.push(row),
            Err(err) => {
                warn!(collection, id = %id, error = %err, "skipping undecodable document")
            }
        }
    }
    rows
}
