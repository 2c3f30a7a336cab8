use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripStatus {
    Preparing,
    #[serde(rename = "On Way")]
    OnWay,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub vehicle_id: String,
    pub vehicle_plate: String,
    pub driver_id: String,
    pub driver_name: String,
    pub origin: String,
    pub destination: String,
    pub distance: f64,
    pub cargo_weight: f64,
    pub estimated_cost: f64,
    pub status: TripStatus,
    pub date: NaiveDate,
}
