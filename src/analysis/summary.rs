//! Executive summary assembly.

use crate::types::{DevelopmentRights, Feasibility, PropertyReport, ReportSummary};

/// Assemble the key-findings block from the derived metrics plus the
/// narrative text (already resolved to a fallback sentence if the external
/// collaborator failed).
pub fn summary(
    report: &PropertyReport,
    rights: &DevelopmentRights,
    feasibility: &Feasibility,
    ai_analysis: String,
) -> ReportSummary {
    let building_count = report.buildings.as_ref().map_or(0, Vec::len);
    let key_findings = vec![
        format!("Site Area: {} sqm", rights.site_area_sqm),
        format!(
            "Max Coverage: {} sqm ({}%)",
            rights.max_coverage_sqm, rights.coverage_percent
        ),
        format!("Max Floor Area: {} sqm", rights.max_floor_area_sqm),
        format!(
            "SG Diagram: {}",
            if report.sg_diagram.is_some() {
                "Available"
            } else {
                "Not found"
            }
        ),
        format!(
            "Flood Risk: {}",
            report
                .flood_risk
                .as_ref()
                .map_or("Unknown", |f| f.risk_level.as_str())
        ),
        format!("Buildings: {building_count} existing"),
    ];

    ReportSummary {
        score: feasibility.score,
        rating: feasibility.rating.clone(),
        verdict: feasibility.verdict.clone(),
        key_findings,
        ai_analysis,
    }
}
