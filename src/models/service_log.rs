use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceLogStatus {
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl std::fmt::Display for ServiceLogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceLogStatus::New => write!(f, "New"),
            ServiceLogStatus::InProgress => write!(f, "In Progress"),
            ServiceLogStatus::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLog {
    pub id: String,
    pub vehicle_id: String,
    pub vehicle_plate: String,
    pub service_type: String,
    pub issue_description: String,
    pub date: NaiveDate,
    pub cost: f64,
    pub technician_name: String,
    pub status: ServiceLogStatus,
}
