//! Indicative cost estimation.
//!
//! Linear in the permitted floor area with fixed floor minimums on the
//! professional and municipal bands. Values are rand amounts.

use crate::types::{CostEstimate, DevelopmentRights};

pub fn cost_estimate(rights: &DevelopmentRights) -> CostEstimate {
    let floor_area = rights.max_floor_area_sqm;
    let band = |rate: f64, minimum: f64| (floor_area * rate).max(minimum).round() as i64;

    CostEstimate {
        professional_fees_low: band(1_500.0, 100_000.0),
        professional_fees_high: band(3_000.0, 300_000.0),
        municipal_fees_low: band(20.0, 5_000.0),
        municipal_fees_high: band(50.0, 20_000.0),
        construction_low: (floor_area * 8_000.0).round() as i64,
        construction_high: (floor_area * 18_000.0).round() as i64,
        total_timeline_weeks: "14-27 weeks".to_string(),
    }
}
