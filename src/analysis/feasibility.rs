//! Feasibility scoring.
//!
//! Point deductions for missing data sources and flood exposure, with
//! qualitative opportunity notes for everything that was found. The score
//! is intentionally not clamped.

use crate::types::{
    BuildingRecord, CadastralRecord, Feasibility, FloodRecord, SurveyDiagram, SuburbRecord,
    ZoningRecord,
};

const DEDUCT_NO_CADASTRAL: i32 = 25;
const DEDUCT_NO_ZONING: i32 = 15;
const DEDUCT_NO_DIAGRAM: i32 = 10;
const DEDUCT_FLOOD_ZONE: i32 = 15;

/// FAR at or above this is called out as development potential.
const GOOD_POTENTIAL_FAR: f64 = 1.2;

pub fn feasibility(
    cadastral: Option<&CadastralRecord>,
    zoning: Option<&ZoningRecord>,
    diagram: Option<&SurveyDiagram>,
    suburb: Option<&SuburbRecord>,
    buildings: Option<&[BuildingRecord]>,
    flood: Option<&FloodRecord>,
) -> Feasibility {
    let mut score = 100;
    let mut issues = Vec::new();
    let mut opportunities = Vec::new();

    match cadastral {
        Some(record) => opportunities.push(format!(
            "Verified: ERF {}",
            record.erf_number.as_deref().unwrap_or("N/A")
        )),
        None => {
            score -= DEDUCT_NO_CADASTRAL;
            issues.push("Not in CSG database".to_string());
        }
    }

    match zoning {
        Some(record) => {
            opportunities.push(format!("Zoning: {}", record.zone_code));
            if record.far >= GOOD_POTENTIAL_FAR {
                opportunities.push("Good development potential".to_string());
            }
        }
        None => {
            score -= DEDUCT_NO_ZONING;
            issues.push("Zoning not available - verify with municipality".to_string());
        }
    }

    if diagram.is_some() {
        opportunities.push("SG diagram available".to_string());
    } else {
        score -= DEDUCT_NO_DIAGRAM;
        issues.push("SG diagram not found".to_string());
    }

    if flood.is_some_and(|f| f.in_flood_zone) {
        score -= DEDUCT_FLOOD_ZONE;
        issues.push("In 100-year flood zone".to_string());
    } else {
        opportunities.push("Outside flood zone".to_string());
    }

    if let Some(buildings) = buildings {
        if !buildings.is_empty() {
            opportunities.push(format!("{} existing structures", buildings.len()));
        }
    }
    if let Some(suburb) = suburb {
        if let Some(name) = &suburb.suburb_name {
            opportunities.push(format!("Area: {name}"));
        }
    }

    let (rating, verdict) = rating_band(score);
    if issues.is_empty() {
        issues.push("No major issues".to_string());
    }

    Feasibility {
        score,
        rating: rating.to_string(),
        verdict: verdict.to_string(),
        issues,
        opportunities,
    }
}

/// Fixed rating bands with their verdict strings.
fn rating_band(score: i32) -> (&'static str, &'static str) {
    if score >= 80 {
        ("EXCELLENT", "RECOMMENDED: Proceed")
    } else if score >= 60 {
        ("GOOD", "VIABLE: Verify details")
    } else if score >= 40 {
        ("MODERATE", "PROCEED: Assessment needed")
    } else {
        ("CHALLENGING", "CAUTION: Issues found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn cadastral() -> CadastralRecord {
        CadastralRecord {
            source: "Chief Surveyor General".to_string(),
            erf_number: Some("1417".to_string()),
            township: None,
            farm_name: None,
            portion: None,
            extent_sqm: Some(812.0),
            sg_code: Some("KEY".to_string()),
            parcel_key: Some("KEY".to_string()),
            legal_status: Some("Registered".to_string()),
            attributes: Map::new(),
        }
    }

    fn zoning(far: f64) -> ZoningRecord {
        ZoningRecord {
            source: "eThekwini Town Planning".to_string(),
            zone_code: "GR3".to_string(),
            zone_description: String::new(),
            scheme_name: None,
            region: None,
            permitted_uses: vec![],
            coverage_percent: 60.0,
            far,
            height_storeys: 3,
            density: String::new(),
            attributes: Map::new(),
        }
    }

    fn flood(in_zone: bool) -> FloodRecord {
        FloodRecord {
            in_flood_zone: in_zone,
            zone_type: None,
            risk_level: String::new(),
            attributes: Map::new(),
        }
    }

    #[test]
    fn all_sources_absent_scores_fifty_moderate() {
        let result = feasibility(None, None, None, None, None, None);
        assert_eq!(result.score, 100 - 25 - 15 - 10);
        assert_eq!(result.rating, "MODERATE");
        assert_eq!(result.issues.len(), 3);
    }

    #[test]
    fn full_data_outside_flood_zone_is_excellent() {
        let c = cadastral();
        let z = zoning(1.4);
        let d = crate::registry::diagram_from_cadastral(Some(&c), "https://viewer/").unwrap();
        let f = flood(false);
        let result = feasibility(Some(&c), Some(&z), Some(&d), None, None, Some(&f));
        assert_eq!(result.score, 100);
        assert_eq!(result.rating, "EXCELLENT");
        assert_eq!(result.issues, ["No major issues"]);
        assert!(result
            .opportunities
            .iter()
            .any(|o| o == "Good development potential"));
    }

    #[test]
    fn flood_zone_deducts_fifteen_with_a_flood_issue() {
        let c = cadastral();
        let z = zoning(1.0);
        let d = crate::registry::diagram_from_cadastral(Some(&c), "https://viewer/").unwrap();
        let f = flood(true);
        let result = feasibility(Some(&c), Some(&z), Some(&d), None, None, Some(&f));
        assert_eq!(result.score, 85);
        assert!(result.issues.iter().any(|i| i.contains("flood zone")));
    }

    #[test]
    fn scoring_is_deterministic_for_identical_inputs() {
        let c = cadastral();
        let first = feasibility(Some(&c), None, None, None, None, None);
        let second = feasibility(Some(&c), None, None, None, None, None);
        assert_eq!(first.score, second.score);
        assert_eq!(first.rating, second.rating);
        assert_eq!(first.issues, second.issues);
    }

    #[test]
    fn rating_band_edges() {
        assert_eq!(rating_band(80).0, "EXCELLENT");
        assert_eq!(rating_band(79).0, "GOOD");
        assert_eq!(rating_band(60).0, "GOOD");
        assert_eq!(rating_band(40).0, "MODERATE");
        assert_eq!(rating_band(39).0, "CHALLENGING");
        assert_eq!(rating_band(-5).0, "CHALLENGING");
    }
}
