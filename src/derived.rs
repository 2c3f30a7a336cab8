/// Kilograms of CO2 released per liter of diesel burned.
pub const DIESEL_CO2_KG_PER_LITER: f64 = 2.68;

pub fn cost_per_km(total_cost: f64, distance: f64) -> f64 {
    if distance == 0.0 {
        return 0.0;
    }
    total_cost / distance
}

pub fn roi(revenue: f64, maintenance_cost: f64, fuel_cost: f64, acquisition_cost: f64) -> f64 {
    if acquisition_cost == 0.0 {
        return 0.0;
    }
    (revenue - (maintenance_cost + fuel_cost)) / acquisition_cost * 100.0
}

pub fn net_profit(revenue: f64, fuel_cost: f64, maintenance_cost: f64) -> f64 {
    revenue - fuel_cost - maintenance_cost
}

pub fn co2_kg(fuel_liters: f64, kg_per_liter: f64) -> f64 {
    fuel_liters * kg_per_liter
}

#[cfg(test)]
mod tests {
    use super::{DIESEL_CO2_KG_PER_LITER, co2_kg, cost_per_km, net_profit, roi};

    #[test]
    fn cost_per_km_divides_total_by_distance() {
        assert!((cost_per_km(15_100.0, 840.0) - 17.976190476190474).abs() < 1e-9);
    }

    #[test]
    fn cost_per_km_is_zero_for_zero_distance() {
        assert_eq!(cost_per_km(15_100.0, 0.0), 0.0);
        assert_eq!(cost_per_km(0.0, 0.0), 0.0);
    }

    #[test]
    fn roi_matches_reference_fleet() {
        let value = roi(500_000.0, 50_000.0, 100_000.0, 1_000_000.0);
        assert!((value - 35.0).abs() < 1e-9);
    }

    #[test]
    fn roi_is_zero_for_zero_acquisition_cost() {
        assert_eq!(roi(500_000.0, 50_000.0, 100_000.0, 0.0), 0.0);
    }

    #[test]
    fn roi_can_go_negative() {
        assert!(roi(10_000.0, 40_000.0, 40_000.0, 100_000.0) < 0.0);
    }

    #[test]
    fn net_profit_subtracts_both_cost_lines() {
        assert_eq!(net_profit(465_000.0, 172_000.0, 46_500.0), 246_500.0);
    }

    #[test]
    fn co2_scales_linearly_with_fuel() {
        assert!((co2_kg(120.0, DIESEL_CO2_KG_PER_LITER) - 321.6).abs() < 1e-9);
    }
}
