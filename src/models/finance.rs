use serde::{Deserialize, Serialize};

/// Read-only aggregate row keyed by month label; written by out-of-band
/// reporting jobs, never by client actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFinancial {
    pub id: String,
    pub month: String,
    pub revenue: f64,
    pub fuel_cost: f64,
    pub maintenance_cost: f64,
    pub net_profit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelEfficiencyEntry {
    pub id: String,
    pub month: String,
    pub km_per_liter: f64,
}
