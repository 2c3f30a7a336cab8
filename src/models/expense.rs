use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
}

/// `total_cost` and `cost_per_km` are computed at write time, never
/// supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub trip_id: String,
    pub vehicle_id: String,
    pub vehicle_plate: String,
    pub driver_name: String,
    pub distance: f64,
    pub fuel_liters: f64,
    pub fuel_cost: f64,
    pub misc_expense: f64,
    pub total_cost: f64,
    pub cost_per_km: f64,
    pub date: NaiveDate,
    pub notes: String,
    pub status: ExpenseStatus,
}
