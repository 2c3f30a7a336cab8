use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::derived;
use crate::models::driver::{Driver, DriverStatus};
use crate::models::expense::Expense;
use crate::models::service_log::{ServiceLog, ServiceLogStatus};
use crate::models::trip::{Trip, TripStatus};
use crate::models::vehicle::{Vehicle, VehicleStatus};

pub fn vehicles_in_shop(vehicles: &[Vehicle]) -> Vec<&Vehicle> {
    vehicles
        .iter()
        .filter(|vehicle| vehicle.status == VehicleStatus::InShop)
        .collect()
}

pub fn available_vehicles(vehicles: &[Vehicle]) -> Vec<&Vehicle> {
    vehicles
        .iter()
        .filter(|vehicle| vehicle.status != VehicleStatus::InShop)
        .collect()
}

pub fn on_duty_drivers(drivers: &[Driver]) -> Vec<&Driver> {
    drivers
        .iter()
        .filter(|driver| driver.status == DriverStatus::OnDuty)
        .collect()
}

pub fn suspended_drivers(drivers: &[Driver]) -> Vec<&Driver> {
    drivers
        .iter()
        .filter(|driver| driver.status == DriverStatus::Suspended)
        .collect()
}

pub fn expired_licenses(drivers: &[Driver], today: NaiveDate) -> Vec<&Driver> {
    drivers
        .iter()
        .filter(|driver| driver.license_expiry < today)
        .collect()
}

/// Licenses still valid today but lapsing within the next thirty days.
pub fn expiring_licenses(drivers: &[Driver], today: NaiveDate) -> Vec<&Driver> {
    let horizon = today + Days::new(30);
    drivers
        .iter()
        .filter(|driver| driver.license_expiry >= today && driver.license_expiry < horizon)
        .collect()
}

pub fn open_service_requests(logs: &[ServiceLog]) -> Vec<&ServiceLog> {
    logs.iter()
        .filter(|log| log.status != ServiceLogStatus::Completed)
        .collect()
}

pub fn completed_trips(trips: &[Trip]) -> Vec<&Trip> {
    trips
        .iter()
        .filter(|trip| trip.status == TripStatus::Completed)
        .collect()
}

pub fn avg_maintenance_cost(logs: &[ServiceLog]) -> f64 {
    if logs.is_empty() {
        return 0.0;
    }
    let total: f64 = logs.iter().map(|log| log.cost).sum();
    (total / logs.len() as f64).round()
}

/// ROI across the whole fleet from the vehicles' cumulative totals.
pub fn fleet_roi(vehicles: &[Vehicle]) -> f64 {
    let revenue: f64 = vehicles.iter().map(|v| v.total_revenue).sum();
    let maintenance: f64 = vehicles.iter().map(|v| v.total_maintenance_cost).sum();
    let fuel: f64 = vehicles.iter().map(|v| v.total_fuel_cost).sum();
    let acquisition: f64 = vehicles.iter().map(|v| v.acquisition_cost).sum();
    derived::roi(revenue, maintenance, fuel, acquisition)
}

/// Carbon figure per recorded trip expense.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripEmission {
    pub trip_id: String,
    pub vehicle_plate: String,
    pub distance: f64,
    pub fuel_consumed: f64,
    pub co2_emissions: f64,
    pub date: NaiveDate,
}

pub fn trip_emissions(expenses: &[Expense]) -> Vec<TripEmission> {
    expenses
        .iter()
        .map(|expense| TripEmission {
            trip_id: expense.trip_id.clone(),
            vehicle_plate: expense.vehicle_plate.clone(),
            distance: expense.distance,
            fuel_consumed: expense.fuel_liters,
            co2_emissions: derived::co2_kg(expense.fuel_liters, derived::DIESEL_CO2_KG_PER_LITER),
            date: expense.date,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{
        avg_maintenance_cost, expired_licenses, expiring_licenses, fleet_roi, open_service_requests,
        trip_emissions, vehicles_in_shop,
    };
    use crate::models::driver::{Driver, DriverStatus};
    use crate::models::expense::{Expense, ExpenseStatus};
    use crate::models::service_log::{ServiceLog, ServiceLogStatus};
    use crate::models::vehicle::{Vehicle, VehicleStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vehicle(id: &str, status: VehicleStatus) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            plate: format!("MH-01-AB-{id}"),
            model: "Tata Ace".to_string(),
            vehicle_type: "Truck".to_string(),
            capacity_ton: 5.0,
            odometer: 70_000,
            status,
            acquisition_cost: 1_000_000.0,
            total_fuel_cost: 100_000.0,
            total_maintenance_cost: 50_000.0,
            total_revenue: 500_000.0,
        }
    }

    fn driver(id: &str, expiry: NaiveDate) -> Driver {
        Driver {
            id: id.to_string(),
            name: "Rajesh Kumar".to_string(),
            license_number: format!("DL-{id}"),
            license_expiry: expiry,
            phone: "+91 98765 43210".to_string(),
            status: DriverStatus::OnDuty,
            completion_rate: 94.0,
            safety_score: 88.0,
            trips_completed: 142,
            complaints: Vec::new(),
            performance_history: Vec::new(),
        }
    }

    fn log(id: &str, cost: f64, status: ServiceLogStatus) -> ServiceLog {
        ServiceLog {
            id: id.to_string(),
            vehicle_id: "v1".to_string(),
            vehicle_plate: "MH-01-AB-1234".to_string(),
            service_type: "Oil Change".to_string(),
            issue_description: "Routine 10k km oil change".to_string(),
            date: date(2026, 2, 12),
            cost,
            technician_name: "Mechanic B".to_string(),
            status,
        }
    }

    #[test]
    fn in_shop_filter_only_matches_in_shop() {
        let fleet = vec![
            vehicle("v1", VehicleStatus::Available),
            vehicle("v2", VehicleStatus::InShop),
            vehicle("v3", VehicleStatus::OnTrip),
        ];
        let in_shop = vehicles_in_shop(&fleet);
        assert_eq!(in_shop.len(), 1);
        assert_eq!(in_shop[0].id, "v2");
    }

    #[test]
    fn license_windows_split_expired_and_expiring() {
        let today = date(2026, 2, 20);
        let roster = vec![
            driver("d1", date(2026, 1, 20)),
            driver("d2", date(2026, 3, 10)),
            driver("d3", date(2027, 5, 30)),
        ];

        let expired = expired_licenses(&roster, today);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id, "d1");

        let expiring = expiring_licenses(&roster, today);
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].id, "d2");
    }

    #[test]
    fn open_requests_exclude_completed_logs() {
        let logs = vec![
            log("s1", 35_000.0, ServiceLogStatus::InProgress),
            log("s2", 3_500.0, ServiceLogStatus::Completed),
            log("s3", 8_000.0, ServiceLogStatus::New),
        ];
        assert_eq!(open_service_requests(&logs).len(), 2);
    }

    #[test]
    fn avg_maintenance_cost_rounds_and_guards_empty() {
        assert_eq!(avg_maintenance_cost(&[]), 0.0);

        let logs = vec![
            log("s1", 35_000.0, ServiceLogStatus::InProgress),
            log("s2", 3_500.0, ServiceLogStatus::Completed),
            log("s3", 8_000.0, ServiceLogStatus::New),
        ];
        assert_eq!(avg_maintenance_cost(&logs), 15_500.0);
    }

    #[test]
    fn fleet_roi_uses_summed_totals() {
        let fleet = vec![vehicle("v1", VehicleStatus::Available)];
        assert!((fleet_roi(&fleet) - 35.0).abs() < 1e-9);
        assert_eq!(fleet_roi(&[]), 0.0);
    }

    #[test]
    fn trip_emissions_scale_with_fuel() {
        let expense = Expense {
            id: "e1".to_string(),
            trip_id: "t1".to_string(),
            vehicle_id: "v1".to_string(),
            vehicle_plate: "MH-01-AB-1234".to_string(),
            driver_name: "Amit Sharma".to_string(),
            distance: 840.0,
            fuel_liters: 120.0,
            fuel_cost: 12_600.0,
            misc_expense: 2_500.0,
            total_cost: 15_100.0,
            cost_per_km: 17.98,
            date: date(2026, 2, 15),
            notes: "Toll charges included".to_string(),
            status: ExpenseStatus::Approved,
        };

        let rows = trip_emissions(&[expense]);
        assert_eq!(rows.len(), 1);
        assert!((rows[0].co2_emissions - 321.6).abs() < 1e-9);
    }
}
