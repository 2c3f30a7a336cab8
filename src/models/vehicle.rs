use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    Available,
    #[serde(rename = "On Trip")]
    OnTrip,
    #[serde(rename = "In Shop")]
    InShop,
    Idle,
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleStatus::Available => write!(f, "Available"),
            VehicleStatus::OnTrip => write!(f, "On Trip"),
            VehicleStatus::InShop => write!(f, "In Shop"),
            VehicleStatus::Idle => write!(f, "Idle"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
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
