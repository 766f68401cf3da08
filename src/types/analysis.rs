//! Derived analysis results.
//!
//! All of these are produced by the pure functions in [`crate::analysis`]
//! from the assembled registry records; none of them touch I/O.

use serde::{Deserialize, Serialize};

/// Development rights derived from zoning parameters and site area.
///
/// When no plausible site area could be established the area-based fields
/// are all zero, meaning "unknown, verify with the municipality".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevelopmentRights {
    pub site_area_sqm: f64,
    pub max_coverage_sqm: f64,
    pub max_floor_area_sqm: f64,
    pub max_height_storeys: u32,
    pub coverage_percent: f64,
    pub floor_area_ratio: f64,
    pub parking_bays_required: u32,
}

/// Point-scored feasibility result.
///
/// The score starts at 100 and is reduced for each missing data source and
/// for flood exposure; it is deliberately not clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feasibility {
    pub score: i32,
    pub rating: String,
    pub verdict: String,
    pub issues: Vec<String>,
    pub opportunities: Vec<String>,
}

/// Static submission checklist for a building-plan application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirements {
    pub documents: Vec<String>,
    pub process_steps: Vec<String>,
    pub timeline_weeks: String,
    pub municipal_contact: String,
}

/// Indicative cost bands, linear in the permitted floor area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    pub professional_fees_low: i64,
    pub professional_fees_high: i64,
    pub municipal_fees_low: i64,
    pub municipal_fees_high: i64,
    pub construction_low: i64,
    pub construction_high: i64,
    pub total_timeline_weeks: String,
}

/// Executive summary placed at the top of the final report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub score: i32,
    pub rating: String,
    pub verdict: String,
    pub key_findings: Vec<String>,
    pub ai_analysis: String,
}
