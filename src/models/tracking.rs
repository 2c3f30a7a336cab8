use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingStatus {
    Moving,
    Idle,
    Stopped,
}

/// Value at the realtime path `liveTracking/{vehicleId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivePosition {
    pub status: TrackingStatus,
    pub lat: f64,
    pub lng: f64,
    pub speed: f64,
    pub destination: String,
    pub eta: String,
}
