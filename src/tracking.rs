use std::sync::Arc;

use dashmap::DashMap;
use rand::Rng;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::models::tracking::{LivePosition, TrackingStatus};
use crate::remote::RealtimeFeed;

// Operating-region box the demo map centers on.
const REGION_CENTER_LAT: f64 = 20.5937;
const REGION_CENTER_LNG: f64 = 78.9629;
const REGION_JITTER_DEG: f64 = 2.5;

/// Latest known position per vehicle, fed by the realtime path
/// `liveTracking/{vehicleId}`.
pub struct LiveTracker {
    positions: Arc<DashMap<String, LivePosition>>,
    task: JoinHandle<()>,
}

impl LiveTracker {
    pub async fn start(feed: Arc<dyn RealtimeFeed>) -> Self {
        let positions: Arc<DashMap<String, LivePosition>> = Arc::new(DashMap::new());

        match feed.fetch_all().await {
            Ok(entries) => {
                for (vehicle_id, position) in entries {
                    positions.insert(vehicle_id, position);
                }
            }
            Err(err) => warn!(error = %err, "initial tracking read failed"),
        }

        let mut rx = feed.subscribe();
        let map = positions.clone();
        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        map.insert(event.vehicle_id, event.position);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "tracking feed lagged");
                    }
                    Err(RecvError::Closed) => {
                        warn!("tracking feed closed");
                        break;
                    }
                }
            }
        });

        info!("live tracker started");
        Self { positions, task }
    }

    /// Vehicles that have never reported get a randomized placeholder inside
    /// the operating region. Good enough for the demo map; a production feed
    /// must cover every vehicle.
    pub fn position(&self, vehicle_id: &str) -> LivePosition {
        if let Some(position) = self.positions.get(vehicle_id) {
            return position.clone();
        }
        placeholder()
    }

    pub fn reported(&self, vehicle_id: &str) -> bool {
        self.positions.contains_key(vehicle_id)
    }

    pub fn positions(&self) -> Vec<(String, LivePosition)> {
        self.positions
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn stop(self) {
        self.task.abort();
        info!("live tracker stopped");
    }
}

fn placeholder() -> LivePosition {
    let mut rng = rand::thread_rng();
    LivePosition {
        status: TrackingStatus::Idle,
        lat: REGION_CENTER_LAT + rng.gen_range(-REGION_JITTER_DEG..REGION_JITTER_DEG),
        lng: REGION_CENTER_LNG + rng.gen_range(-REGION_JITTER_DEG..REGION_JITTER_DEG),
        speed: 0.0,
        destination: String::new(),
        eta: "N/A".to_string(),
    }
}
