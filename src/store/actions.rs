use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::derived;
use crate::error::FleetError;
use crate::models::driver::{Driver, DriverStatus};
use crate::models::expense::{Expense, ExpenseStatus};
use crate::models::service_log::{ServiceLog, ServiceLogStatus};
use crate::models::trip::{Trip, TripStatus};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::remote::{Document, collections, to_document};
use crate::store::{FleetStore, NoticeSeverity};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub plate: String,
    pub model: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub capacity_ton: f64,
    pub odometer: u64,
    pub status: VehicleStatus,
    pub acquisition_cost: f64,
    pub total_fuel_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDriver {
    pub name: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub phone: String,
    pub status: DriverStatus,
    pub completion_rate: f64,
    pub safety_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    pub vehicle_id: String,
    pub driver_id: String,
    pub origin: String,
    pub destination: String,
    pub distance: f64,
    pub cargo_weight: f64,
    pub estimated_cost: f64,
    pub status: TripStatus,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceLog {
    pub vehicle_id: String,
    pub service_type: String,
    pub issue_description: String,
    pub date: NaiveDate,
    pub cost: f64,
    pub technician_name: String,
    pub status: ServiceLogStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub trip_id: String,
    pub vehicle_id: String,
    pub fuel_liters: f64,
    pub fuel_cost: f64,
    pub misc_expense: f64,
    pub date: NaiveDate,
    pub notes: String,
    pub status: ExpenseStatus,
}

impl FleetStore {
    pub async fn add_vehicle(&self, new: NewVehicle) -> Result<String, FleetError> {
        let vehicle = Vehicle {
            id: String::new(),
            plate: new.plate.clone(),
            model: new.model,
            vehicle_type: new.vehicle_type,
            capacity_ton: new.capacity_ton,
            odometer: new.odometer,
            status: new.status,
            acquisition_cost: new.acquisition_cost,
            total_fuel_cost: new.total_fuel_cost,
            total_maintenance_cost: new.total_maintenance_cost,
            total_revenue: new.total_revenue,
        };

        let id = self
            .create_document(collections::VEHICLES, to_document(&vehicle)?)
            .await?;

        info!(vehicle_id = %id, plate = %new.plate, "vehicle registered");
        self.notify(
            NoticeSeverity::Success,
            "Vehicle registered",
            format!("{} added to the fleet", new.plate),
        );
        Ok(id)
    }

    pub async fn add_driver(&self, new: NewDriver) -> Result<String, FleetError> {
        let driver = Driver {
            id: String::new(),
            name: new.name.clone(),
            license_number: new.license_number,
            license_expiry: new.license_expiry,
            phone: new.phone,
            status: new.status,
            completion_rate: new.completion_rate,
            safety_score: new.safety_score,
            trips_completed: 0,
            complaints: Vec::new(),
            performance_history: Vec::new(),
        };

        // The sub-lists live in per-driver subcollections, not in the
        // driver document.
        let mut doc = to_document(&driver)?;
        doc.remove("complaints");
        doc.remove("performanceHistory");

        let id = self.create_document(collections::DRIVERS, doc).await?;

        info!(driver_id = %id, "driver added");
        self.notify(
            NoticeSeverity::Success,
            "Driver added",
            format!("{} registered successfully", new.name),
        );
        Ok(id)
    }

    /// Rejects before writing when either referenced id is absent from the
    /// local snapshot; the denormalized plate and name are read there.
    pub async fn add_trip(&self, new: NewTrip) -> Result<String, FleetError> {
        let vehicle = self.find_vehicle(&new.vehicle_id)?;
        let driver = self.find_driver(&new.driver_id)?;

        let trip = Trip {
            id: String::new(),
            vehicle_id: vehicle.id,
            vehicle_plate: vehicle.plate,
            driver_id: driver.id,
            driver_name: driver.name.clone(),
            origin: new.origin.clone(),
            destination: new.destination.clone(),
            distance: new.distance,
            cargo_weight: new.cargo_weight,
            estimated_cost: new.estimated_cost,
            status: new.status,
            date: new.date,
        };

        let id = self
            .create_document(collections::TRIPS, to_document(&trip)?)
            .await?;

        info!(trip_id = %id, origin = %new.origin, destination = %new.destination, "trip dispatched");
        self.notify(
            NoticeSeverity::Success,
            "Trip dispatched",
            format!(
                "{} to {} assigned to {}",
                new.origin, new.destination, driver.name
            ),
        );
        Ok(id)
    }

    /// Creates the log, then cascades the vehicle to "In Shop". The two
    /// writes are independent; a failed cascade leaves the log in place and
    /// surfaces as `FleetError::Cascade`.
    pub async fn add_service_log(&self, new: NewServiceLog) -> Result<String, FleetError> {
        let vehicle = self.find_vehicle(&new.vehicle_id)?;

        let log = ServiceLog {
            id: String::new(),
            vehicle_id: vehicle.id.clone(),
            vehicle_plate: vehicle.plate.clone(),
            service_type: new.service_type,
            issue_description: new.issue_description,
            date: new.date,
            cost: new.cost,
            technician_name: new.technician_name,
            status: new.status,
        };

        let id = self
            .create_document(collections::SERVICE_LOGS, to_document(&log)?)
            .await?;

        info!(log_id = %id, vehicle_id = %vehicle.id, "service log created");
        self.notify(
            NoticeSeverity::Success,
            "Service log created",
            format!("{} moved to \"In Shop\"", vehicle.plate),
        );

        self.cascade_vehicle_status(&vehicle.id, VehicleStatus::InShop)
            .await?;
        Ok(id)
    }

    pub async fn update_service_log_status(
        &self,
        log_id: &str,
        status: ServiceLogStatus,
    ) -> Result<(), FleetError> {
        let log = self.find_service_log(log_id)?;

        self.update_document(
            collections::SERVICE_LOGS,
            log_id,
            single_field("status", &status)?,
        )
        .await?;

        info!(log_id = %log_id, status = %status, "service log status updated");
        self.notify(
            NoticeSeverity::Success,
            "Status updated",
            format!("Service log {log_id} is now {status}"),
        );

        if status == ServiceLogStatus::Completed {
            self.cascade_vehicle_status(&log.vehicle_id, VehicleStatus::Available)
                .await?;
        }
        Ok(())
    }

    /// Creates the expense (derived totals computed here), then cascades the
    /// vehicle's cumulative fuel cost. Same weak-consistency contract as the
    /// service-log cascade.
    pub async fn add_expense(&self, new: NewExpense) -> Result<String, FleetError> {
        let trip = self.find_trip(&new.trip_id)?;
        let vehicle = self.find_vehicle(&new.vehicle_id)?;

        let total_cost = new.fuel_cost + new.misc_expense;
        let expense = Expense {
            id: String::new(),
            trip_id: trip.id,
            vehicle_id: vehicle.id.clone(),
            vehicle_plate: vehicle.plate,
            driver_name: trip.driver_name,
            distance: trip.distance,
            fuel_liters: new.fuel_liters,
            fuel_cost: new.fuel_cost,
            misc_expense: new.misc_expense,
            total_cost,
            cost_per_km: derived::cost_per_km(total_cost, trip.distance),
            date: new.date,
            notes: new.notes,
            status: new.status,
        };

        let id = self
            .create_document(collections::EXPENSES, to_document(&expense)?)
            .await?;

        info!(expense_id = %id, vehicle_id = %vehicle.id, total_cost, "expense recorded");
        self.notify(
            NoticeSeverity::Success,
            "Expense recorded",
            "Operational cost updated".to_string(),
        );

        // The remote API has no increment primitive; the new total comes
        // from the local snapshot.
        self.cascade_vehicle_field(
            &vehicle.id,
            "totalFuelCost",
            serde_json::json!(vehicle.total_fuel_cost + new.fuel_cost),
        )
        .await?;
        Ok(id)
    }

    pub async fn update_vehicle_status(
        &self,
        vehicle_id: &str,
        status: VehicleStatus,
    ) -> Result<(), FleetError> {
        self.update_document(
            collections::VEHICLES,
            vehicle_id,
            single_field("status", &status)?,
        )
        .await?;

        info!(vehicle_id = %vehicle_id, status = %status, "vehicle status updated");
        Ok(())
    }

    pub async fn update_driver_status(
        &self,
        driver_id: &str,
        status: DriverStatus,
    ) -> Result<(), FleetError> {
        self.update_document(
            collections::DRIVERS,
            driver_id,
            single_field("status", &status)?,
        )
        .await?;

        info!(driver_id = %driver_id, status = %status, "driver status updated");
        self.notify(
            NoticeSeverity::Success,
            "Driver status updated",
            format!("Status changed to {status}"),
        );
        Ok(())
    }

    /// No cascade: orphaned trips, logs and expenses keep rendering their
    /// denormalized display fields.
    pub async fn delete_vehicle(&self, vehicle_id: &str) -> Result<(), FleetError> {
        self.delete_document(collections::VEHICLES, vehicle_id)
            .await?;

        info!(vehicle_id = %vehicle_id, "vehicle deleted");
        self.notify(
            NoticeSeverity::Info,
            "Vehicle removed",
            format!("Vehicle {vehicle_id} deleted from the registry"),
        );
        Ok(())
    }

    async fn create_document(
        &self,
        collection: &str,
        doc: Document,
    ) -> Result<String, FleetError> {
        match self.remote().create(collection, doc).await {
            Ok(id) => {
                self.metrics()
                    .remote_writes_total
                    .with_label_values(&[collection, "ok"])
                    .inc();
                Ok(id)
            }
            Err(err) => {
                self.metrics()
                    .remote_writes_total
                    .with_label_values(&[collection, "error"])
                    .inc();
                error!(collection, error = %err, "remote create failed");
                Err(FleetError::Remote(err))
            }
        }
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<(), FleetError> {
        match self.remote().update(collection, id, patch).await {
            Ok(()) => {
                self.metrics()
                    .remote_writes_total
                    .with_label_values(&[collection, "ok"])
                    .inc();
                Ok(())
            }
            Err(err) => {
                self.metrics()
                    .remote_writes_total
                    .with_label_values(&[collection, "error"])
                    .inc();
                error!(collection, id, error = %err, "remote update failed");
                Err(FleetError::Remote(err))
            }
        }
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), FleetError> {
        match self.remote().delete(collection, id).await {
            Ok(()) => {
                self.metrics()
                    .remote_writes_total
                    .with_label_values(&[collection, "ok"])
                    .inc();
                Ok(())
            }
            Err(err) => {
                self.metrics()
                    .remote_writes_total
                    .with_label_values(&[collection, "error"])
                    .inc();
                error!(collection, id, error = %err, "remote delete failed");
                Err(FleetError::Remote(err))
            }
        }
    }

    async fn cascade_vehicle_status(
        &self,
        vehicle_id: &str,
        status: VehicleStatus,
    ) -> Result<(), FleetError> {
        self.cascade_vehicle_field(vehicle_id, "status", serde_json::to_value(status)?)
            .await
    }

    async fn cascade_vehicle_field(
        &self,
        vehicle_id: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<(), FleetError> {
        let mut patch = Document::new();
        patch.insert(field.to_string(), value);

        match self.update_document(collections::VEHICLES, vehicle_id, patch).await {
            Ok(()) => Ok(()),
            Err(FleetError::Remote(source)) => {
                error!(vehicle_id, field, error = %source, "cascade write failed; records disagree until replayed");
                self.notify(
                    NoticeSeverity::Error,
                    "Vehicle update failed",
                    format!("Vehicle {vehicle_id} could not be updated; retry the status change"),
                );
                Err(FleetError::Cascade {
                    entity: format!("vehicle {vehicle_id}"),
                    source,
                })
            }
            Err(other) => Err(other),
        }
    }
}

fn single_field<T: Serialize>(key: &str, value: &T) -> Result<Document, FleetError> {
    let mut patch = Document::new();
    patch.insert(key.to_string(), serde_json::to_value(value)?);
    Ok(patch)
}
