pub mod actions;

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio_stream::wrappers::BroadcastStream;

use crate::config::Config;
use crate::error::FleetError;
use crate::models::driver::Driver;
use crate::models::expense::Expense;
use crate::models::finance::{FuelEfficiencyEntry, MonthlyFinancial};
use crate::models::service_log::ServiceLog;
use crate::models::trip::Trip;
use crate::models::vehicle::Vehicle;
use crate::observability::metrics::Metrics;
use crate::remote::DocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Info,
    Success,
    Error,
}

/// User-facing confirmation signal. Display and expiry are the consumer's
/// concern; the store only emits.
#[derive(Debug, Clone)]
pub struct Notice {
    pub title: String,
    pub detail: String,
    pub severity: NoticeSeverity,
}

/// In-memory observable cache of the remote fleet collections. Every list
/// is replaced wholesale by the sync engine; actions never mutate the lists
/// directly, they write through to the remote store and wait for the
/// subscription to reflect the change.
pub struct FleetStore {
    remote: Arc<dyn DocumentStore>,
    vehicles: watch::Sender<Vec<Vehicle>>,
    drivers: watch::Sender<Vec<Driver>>,
    trips: watch::Sender<Vec<Trip>>,
    service_logs: watch::Sender<Vec<ServiceLog>>,
    expenses: watch::Sender<Vec<Expense>>,
    monthly_financials: watch::Sender<Vec<MonthlyFinancial>>,
    fuel_efficiency: watch::Sender<Vec<FuelEfficiencyEntry>>,
    notice_tx: broadcast::Sender<Notice>,
    metrics: Metrics,
}

impl FleetStore {
    pub fn new(remote: Arc<dyn DocumentStore>, config: &Config) -> Self {
        let (notice_tx, _unused_rx) = broadcast::channel(config.notice_buffer_size);

        Self {
            remote,
            vehicles: watch::channel(Vec::new()).0,
            drivers: watch::channel(Vec::new()).0,
            trips: watch::channel(Vec::new()).0,
            service_logs: watch::channel(Vec::new()).0,
            expenses: watch::channel(Vec::new()).0,
            monthly_financials: watch::channel(Vec::new()).0,
            fuel_efficiency: watch::channel(Vec::new()).0,
            notice_tx,
            metrics: Metrics::new(),
        }
    }

    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.vehicles.borrow().clone()
    }

    pub fn drivers(&self) -> Vec<Driver> {
        self.drivers.borrow().clone()
    }

    pub fn trips(&self) -> Vec<Trip> {
        self.trips.borrow().clone()
    }

    pub fn service_logs(&self) -> Vec<ServiceLog> {
        self.service_logs.borrow().clone()
    }

    pub fn expenses(&self) -> Vec<Expense> {
        self.expenses.borrow().clone()
    }

    pub fn monthly_financials(&self) -> Vec<MonthlyFinancial> {
        self.monthly_financials.borrow().clone()
    }

    pub fn fuel_efficiency(&self) -> Vec<FuelEfficiencyEntry> {
        self.fuel_efficiency.borrow().clone()
    }

    pub fn watch_vehicles(&self) -> watch::Receiver<Vec<Vehicle>> {
        self.vehicles.subscribe()
    }

    pub fn watch_drivers(&self) -> watch::Receiver<Vec<Driver>> {
        self.drivers.subscribe()
    }

    pub fn watch_trips(&self) -> watch::Receiver<Vec<Trip>> {
        self.trips.subscribe()
    }

    pub fn watch_service_logs(&self) -> watch::Receiver<Vec<ServiceLog>> {
        self.service_logs.subscribe()
    }

    pub fn watch_expenses(&self) -> watch::Receiver<Vec<Expense>> {
        self.expenses.subscribe()
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notice_tx.subscribe()
    }

    pub fn notice_stream(&self) -> BroadcastStream<Notice> {
        BroadcastStream::new(self.notice_tx.subscribe())
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub(crate) fn remote(&self) -> &Arc<dyn DocumentStore> {
        &self.remote
    }

    pub(crate) fn notify(&self, severity: NoticeSeverity, title: &str, detail: String) {
        let _ = self.notice_tx.send(Notice {
            title: title.to_string(),
            detail,
            severity,
        });
    }

    pub(crate) fn apply_vehicles(&self, rows: Vec<Vehicle>) {
        self.vehicles.send_replace(rows);
    }

    pub(crate) fn apply_drivers(&self, rows: Vec<Driver>) {
        self.drivers.send_replace(rows);
    }

    pub(crate) fn apply_trips(&self, rows: Vec<Trip>) {
        self.trips.send_replace(rows);
    }

    pub(crate) fn apply_service_logs(&self, rows: Vec<ServiceLog>) {
        self.service_logs.send_replace(rows);
    }

    pub(crate) fn apply_expenses(&self, rows: Vec<Expense>) {
        self.expenses.send_replace(rows);
    }

    pub(crate) fn apply_monthly_financials(&self, rows: Vec<MonthlyFinancial>) {
        self.monthly_financials.send_replace(rows);
    }

    pub(crate) fn apply_fuel_efficiency(&self, rows: Vec<FuelEfficiencyEntry>) {
        self.fuel_efficiency.send_replace(rows);
    }

    pub(crate) fn find_vehicle(&self, vehicle_id: &str) -> Result<Vehicle, FleetError> {
        self.vehicles
            .borrow()
            .iter()
            .find(|vehicle| vehicle.id == vehicle_id)
            .cloned()
            .ok_or_else(|| {
                FleetError::ReferenceNotFound(format!("vehicle {vehicle_id} is not known locally"))
            })
    }

    pub(crate) fn find_driver(&self, driver_id: &str) -> Result<Driver, FleetError> {
        self.drivers
            .borrow()
            .iter()
            .find(|driver| driver.id == driver_id)
            .cloned()
            .ok_or_else(|| {
                FleetError::ReferenceNotFound(format!("driver {driver_id} is not known locally"))
            })
    }

    pub(crate) fn find_trip(&self, trip_id: &str) -> Result<Trip, FleetError> {
        self.trips
            .borrow()
            .iter()
            .find(|trip| trip.id == trip_id)
            .cloned()
            .ok_or_else(|| {
                FleetError::ReferenceNotFound(format!("trip {trip_id} is not known locally"))
            })
    }

    pub(crate) fn find_service_log(&self, log_id: &str) -> Result<ServiceLog, FleetError> {
        self.service_logs
            .borrow()
            .iter()
            .find(|log| log.id == log_id)
            .cloned()
            .ok_or_else(|| {
                FleetError::ReferenceNotFound(format!("service log {log_id} is not known locally"))
            })
    }
}
