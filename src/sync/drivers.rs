use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::models::driver::{Complaint, Driver, PerformanceEntry};
use crate::observability::metrics::Metrics;
use crate::remote::{Document, DocumentStore, RemoteError, collections, from_document};

/// Issues two nested reads per driver, all concurrently, and resolves only
/// when every read has settled. A failed read degrades that driver to an
/// empty sub-list; the batch itself never aborts.
pub(crate) async fn hydrate(
    remote: Arc<dyn DocumentStore>,
    mut drivers: Vec<Driver>,
    metrics: &Metrics,
) -> Vec<Driver> {
    let lookups = drivers.iter().map(|driver| {
        let remote = Arc::clone(&remote);
        let driver_id = driver.id.clone();

        async move {
            let complaints_collection = collections::driver_complaints(&driver_id);
            let performance_collection = collections::driver_performance(&driver_id);
            let (complaints, history) = futures::join!(
                remote.fetch_all(&complaints_collection),
                remote.fetch_all(&performance_collection),
            );
            (driver_id, complaints, history)
        }
    });

    let settled = futures::future::join_all(lookups).await;

    for (driver, (driver_id, complaints, history)) in drivers.iter_mut().zip(settled) {
        driver.complaints = sublist::<Complaint>(&driver_id, "complaints", complaints, metrics);
        driver.performance_history =
            sublist::<PerformanceEntry>(&driver_id, "performanceHistory", history, metrics);
    }

    drivers
}

fn sublist<T: DeserializeOwned>(
    driver_id: &str,
    kind: &str,
    fetched: Result<Vec<(String, Document)>, RemoteError>,
    metrics: &Metrics,
) -> Vec<T> {
    match fetched {
        Ok(docs) => {
            metrics.nested_reads_total.with_label_values(&["ok"]).inc();
            docs.iter()
                .filter_map(|(id, doc)| match from_document::<T>(id, doc) {
                    Ok(row) => Some(row),
                    Err(err) => {
                        warn!(driver_id, kind, id = %id, error = %err, "skipping undecodable sub-list document");
                        None
                    }
                })
                .collect()
        }
        Err(err) => {
            metrics
                .nested_reads_total
                .with_label_values(&["error"])
                .inc();
            warn!(driver_id, kind, error = %err, "nested read failed; driver keeps an empty sub-list");
            Vec::new()
        }
    }
}
