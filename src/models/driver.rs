use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverStatus {
    #[serde(rename = "On Duty")]
    OnDuty,
    #[serde(rename = "Off Duty")]
    OffDuty,
    Suspended,
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverStatus::OnDuty => write!(f, "On Duty"),
            DriverStatus::OffDuty => write!(f, "Off Duty"),
            DriverStatus::Suspended => write!(f, "Suspended"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplaintSeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub severity: ComplaintSeverity,
}

/// One month of a driver's rolling performance record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    pub month: String,
    pub completion_rate: f64,
    pub safety_score: f64,
}

/// Complaints and performance history live in per-driver subcollections,
/// so a bare driver document decodes with both lists empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub phone: String,
    pub status: DriverStatus,
    pub completion_rate: f64,
    pub safety_score: f64,
    pub trips_completed: u32,
    #[serde(default)]
    pub complaints: Vec<Complaint>,
    #[serde(default)]
    pub performance_history: Vec<PerformanceEntry>,
}
