use serde::Serialize;

// Demo ratios recovered from the dashboard's canned optimizer output: the
// "optimized" route trims 4% of the distance, trucks average 60 km/h, the
// fleet emits 0.386 kg CO2 per km and a saved km is worth 40 currency units.
const DISTANCE_SAVINGS_RATIO: f64 = 0.04;
const AVG_SPEED_KMH: f64 = 60.0;
const CO2_KG_PER_KM: f64 = 0.386;
const COST_PER_SAVED_KM: f64 = 40.0;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEstimate {
    pub distance: f64,
    pub duration_hours: f64,
    pub co2_kg: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSavings {
    pub distance: f64,
    pub time_hours: f64,
    pub co2_kg: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    pub origin: String,
    pub destination: String,
    pub standard: RouteEstimate,
    pub optimized: RouteEstimate,
    pub savings: RouteSavings,
}

/// Canned optimizer: real route planning is out of scope, so the "savings"
/// are fixed fractions of the requested distance.
pub fn optimize(origin: &str, destination: &str, distance: f64) -> RoutePlan {
    let standard = estimate(distance);
    let optimized = estimate(distance * (1.0 - DISTANCE_SAVINGS_RATIO));
    let saved_km = standard.distance - optimized.distance;

    RoutePlan {
        origin: origin.to_string(),
        destination: destination.to_string(),
        savings: RouteSavings {
            distance: saved_km,
            time_hours: standard.duration_hours - optimized.duration_hours,
            co2_kg: standard.co2_kg - optimized.co2_kg,
            cost: saved_km * COST_PER_SAVED_KM,
        },
        standard,
        optimized,
    }
}

fn estimate(distance: f64) -> RouteEstimate {
    RouteEstimate {
        distance,
        duration_hours: distance / AVG_SPEED_KMH,
        co2_kg: distance * CO2_KG_PER_KM,
    }
}

#[cfg(test)]
mod tests {
    use super::optimize;

    #[test]
    fn optimized_route_is_strictly_cheaper() {
        let plan = optimize("Mumbai", "Delhi", 1_450.0);

        assert!(plan.optimized.distance < plan.standard.distance);
        assert!(plan.optimized.duration_hours < plan.standard.duration_hours);
        assert!(plan.optimized.co2_kg < plan.standard.co2_kg);
        assert!(plan.savings.cost > 0.0);
    }

    #[test]
    fn savings_are_consistent_with_the_two_estimates() {
        let plan = optimize("Pune", "Bangalore", 850.0);

        let saved = plan.standard.distance - plan.optimized.distance;
        assert!((plan.savings.distance - saved).abs() < 1e-9);
        assert!((plan.savings.cost - saved * 40.0).abs() < 1e-9);
    }

    #[test]
    fn zero_distance_yields_zero_savings() {
        let plan = optimize("Chennai", "Chennai", 0.0);
        assert_eq!(plan.savings.distance, 0.0);
        assert_eq!(plan.savings.cost, 0.0);
    }
}
