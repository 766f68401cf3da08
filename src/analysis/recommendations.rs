//! Numbered action list for the prospective developer.
//!
//! Branches on survey-diagram availability, flood exposure, and the
//! feasibility score: a score of 70 or above picks the accelerated pair of
//! next actions.

use crate::types::{CadastralRecord, Feasibility, FloodRecord, SurveyDiagram, ZoningRecord};

/// Score threshold for the accelerated next-action pair.
const ACCELERATED_SCORE: i32 = 70;

pub fn recommendations(
    _cadastral: Option<&CadastralRecord>,
    _zoning: Option<&ZoningRecord>,
    diagram: Option<&SurveyDiagram>,
    flood: Option<&FloodRecord>,
    feasibility: &Feasibility,
) -> Vec<String> {
    let mut actions =
        vec!["1. Obtain zoning certificate from eThekwini Planning".to_string()];

    match diagram {
        Some(d) => actions.push(format!("2. Download SG diagram: {}", d.download_link)),
        None => actions.push("2. Request SG diagram from Surveyor General".to_string()),
    }
    actions.push("3. Commission site survey".to_string());
    actions.push("4. Verify title deed".to_string());

    if flood.is_some_and(|f| f.in_flood_zone) {
        actions.push("5. Flood study required".to_string());
    }

    if feasibility.score >= ACCELERATED_SCORE {
        actions.push("6. Engage architect".to_string());
        actions.push("7. Appoint professional team".to_string());
    } else {
        actions.push("6. Address identified issues".to_string());
        actions.push("7. Consult a town planner".to_string());
    }
    actions.push("8. Submit building plans".to_string());
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn feas(score: i32) -> Feasibility {
        Feasibility {
            score,
            rating: String::new(),
            verdict: String::new(),
            issues: vec![],
            opportunities: vec![],
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
    fn high_scores_pick_the_accelerated_actions() {
        let actions = recommendations(None, None, None, None, &feas(85));
        assert!(actions.iter().any(|a| a.contains("Engage architect")));
        assert!(!actions.iter().any(|a| a.contains("town planner")));
    }

    #[test]
    fn low_scores_pick_the_remediation_actions() {
        let actions = recommendations(None, None, None, None, &feas(50));
        assert!(actions.iter().any(|a| a.contains("town planner")));
        assert!(!actions.iter().any(|a| a.contains("Engage architect")));
    }

    #[test]
    fn flood_exposure_adds_the_flood_study_item() {
        let f = flood(true);
        let actions = recommendations(None, None, None, Some(&f), &feas(85));
        assert!(actions.iter().any(|a| a.contains("Flood study")));

        let dry = flood(false);
        let actions = recommendations(None, None, None, Some(&dry), &feas(85));
        assert!(!actions.iter().any(|a| a.contains("Flood study")));
    }

    #[test]
    fn diagram_availability_switches_the_second_item() {
        let diagram = SurveyDiagram {
            sg_number: "SG TEST".to_string(),
            sg_code: None,
            download_link: "https://viewer/?prclkey=TEST".to_string(),
            farm_name: None,
            erf: None,
            township: None,
            portion: None,
            extent_ha: None,
        };
        let with = recommendations(None, None, Some(&diagram), None, &feas(85));
        assert!(with[1].contains("https://viewer/?prclkey=TEST"));

        let without = recommendations(None, None, None, None, &feas(85));
        assert!(without[1].contains("Request SG diagram"));
    }
}
