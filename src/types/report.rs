//! Registry records and the top-level report aggregate.
//!
//! Every record is an immutable value produced once per research run. The
//! `PropertyReport` starts empty and is populated field by field as each
//! pipeline step completes; `success` flips to `true` only once the derived
//! metrics have been computed.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw upstream attributes carried alongside each normalized record.
pub type Attributes = Map<String, Value>;

/// Geocoded location of the requested address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    pub city: String,
    pub province: String,
    pub country: String,
}

/// Cadastral parcel record from the Chief Surveyor General registry.
///
/// `extent_sqm` is clamped: values above the plausible urban parcel ceiling
/// are dropped at parse time so farm-scale noise never reaches the
/// area-based derivations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadastralRecord {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub erf_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub township: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent_sqm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sg_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parcel_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_status: Option<String>,
    pub attributes: Attributes,
}

/// Record from the municipal approved-parcels layer.
///
/// The registry reports area in hectares; `area_sqm` is always the converted
/// value (`area_ha * 10_000`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovedParcelRecord {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub erf_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub township: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_ha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_sqm: Option<f64>,
    pub attributes: Attributes,
}

/// Zoning record with planning parameters resolved from the scheme table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoningRecord {
    pub source: String,
    pub zone_code: String,
    pub zone_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub permitted_uses: Vec<String>,
    pub coverage_percent: f64,
    pub far: f64,
    pub height_storeys: u32,
    pub density: String,
    pub attributes: Attributes,
}

/// One building footprint near the coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roof_area_sqm: Option<f64>,
    pub attributes: Attributes,
}

/// Survey diagram reference synthesized from the cadastral parcel key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyDiagram {
    pub sg_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sg_code: Option<String>,
    pub download_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub erf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub township: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent_ha: Option<f64>,
}

/// 100-year flood plain status at the coordinate.
///
/// Absence of any intersecting feature is the affirmative "no risk" result.
/// Transport failures degrade to `in_flood_zone = false` with risk level
/// `"Unknown"` rather than aborting the step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloodRecord {
    pub in_flood_zone: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_type: Option<String>,
    pub risk_level: String,
    pub attributes: Attributes,
}

/// One road segment near the coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub road_type: Option<String>,
    pub attributes: Attributes,
}

/// Suburb overview record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuburbRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburb_name: Option<String>,
    pub attributes: Attributes,
}

/// Top-level aggregate for one research run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyReport {
    pub success: bool,
    pub report_id: String,
    pub address_input: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadastral: Option<CadastralRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_parcels: Option<ApprovedParcelRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoning: Option<ZoningRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildings: Option<Vec<BuildingRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sg_diagram: Option<SurveyDiagram>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flood_risk: Option<FloodRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roads: Option<Vec<RoadRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburb: Option<SuburbRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub development_rights: Option<crate::types::DevelopmentRights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feasibility: Option<crate::types::Feasibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<crate::types::Requirements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costs: Option<crate::types::CostEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<crate::types::ReportSummary>,
}

impl PropertyReport {
    /// Create an empty report for a new research run.
    pub fn new(address: &str) -> Self {
        Self {
            success: false,
            report_id: report_id(address),
            address_input: address.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            location: None,
            cadastral: None,
            approved_parcels: None,
            zoning: None,
            buildings: None,
            sg_diagram: None,
            flood_risk: None,
            roads: None,
            suburb: None,
            development_rights: None,
            feasibility: None,
            requirements: None,
            costs: None,
            recommendations: None,
            summary: None,
        }
    }
}

/// Build a report identifier from the sanitized address plus a millisecond
/// timestamp, e.g. `report_12_Main_Road_Glenwood_1724572800000`.
pub fn report_id(address: &str) -> String {
    let slug: String = address
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(30)
        .collect();
    format!("report_{}_{}", slug, Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_id_sanitizes_and_truncates() {
        let id = report_id("12 Main Road, Glenwood! A very long address indeed");
        let slug = id
            .strip_prefix("report_")
            .and_then(|rest| rest.rsplit_once('_'))
            .map(|(slug, _)| slug)
            .unwrap();
        assert_eq!(slug.len(), 30);
        assert!(slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        assert!(slug.starts_with("12_Main_Road"));
    }

    #[test]
    fn new_report_starts_unsuccessful_and_empty() {
        let report = PropertyReport::new("45 Florida Road");
        assert!(!report.success);
        assert_eq!(report.address_input, "45 Florida Road");
        assert!(report.location.is_none());
        assert!(report.summary.is_none());
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let report = PropertyReport::new("45 Florida Road");
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("cadastral").is_none());
        assert!(json.get("report_id").is_some());
    }
}
