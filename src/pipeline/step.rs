//! Post-geocode research steps.
//!
//! Each step wraps one registry lookup: it owns its identity, its fixed
//! target progress percentage, the query description, and the canned
//! presence/absence finding phrasings. The runner iterates the ordered
//! list returned by [`post_geocode_steps`] and handles all event plumbing,
//! so steps stay independently testable.
//!
//! Failure policy: a step never fails the run. On any adapter error the
//! report field stays absent and the "not found" finding is returned.

use async_trait::async_trait;
use tracing::debug;

use crate::registry::{diagram_from_cadastral, RegistryProvider};
use crate::types::{Location, PropertyReport};

/// Everything a step needs to run its lookup.
pub struct StepContext<'a> {
    pub registry: &'a dyn RegistryProvider,
    /// Public Surveyor General viewer, used for diagram deep links.
    pub viewer_url: &'a str,
    pub location: &'a Location,
}

/// One post-geocode step in the fixed research sequence.
#[async_trait]
pub trait ResearchStep: Send + Sync {
    /// Stable identifier carried on progress events (`sourceId`).
    fn id(&self) -> &'static str;

    /// Human-readable source name (`sourceName`).
    fn name(&self) -> &'static str;

    /// Progress percentage this step advances to on completion.
    fn target_progress(&self) -> u8;

    /// Description of the query about to run.
    fn searching(&self) -> String;

    /// Run the lookup, populate the step's report field, and return the
    /// finding line for the progress stream.
    async fn run(&self, ctx: &StepContext<'_>, report: &mut PropertyReport) -> String;
}

/// The fixed ordered step list after geocoding.
pub fn post_geocode_steps() -> Vec<Box<dyn ResearchStep>> {
    vec![
        Box::new(CadastralStep),
        Box::new(ApprovedParcelsStep),
        Box::new(ZoningStep),
        Box::new(BuildingsStep),
        Box::new(SurveyDiagramStep),
        Box::new(FloodStep),
        Box::new(RoadsStep),
        Box::new(SuburbStep),
    ]
}

// ============================================================================
// Step implementations
// ============================================================================

struct CadastralStep;

#[async_trait]
impl ResearchStep for CadastralStep {
    fn id(&self) -> &'static str {
        "cadastral"
    }
    fn name(&self) -> &'static str {
        "CSG Cadastral"
    }
    fn target_progress(&self) -> u8 {
        18
    }
    fn searching(&self) -> String {
        "Querying Chief Surveyor General database...".to_string()
    }

    async fn run(&self, ctx: &StepContext<'_>, report: &mut PropertyReport) -> String {
        match ctx
            .registry
            .cadastral(ctx.location.lon, ctx.location.lat)
            .await
        {
            Ok(record) => {
                let extent = record
                    .extent_sqm
                    .map_or_else(|| "?".to_string(), |a| format!("{a:.0}"));
                let finding = format!(
                    "CSG: ERF {}, {} ({extent} sqm)",
                    record.erf_number.as_deref().unwrap_or("N/A"),
                    record
                        .township
                        .as_deref()
                        .or(record.farm_name.as_deref())
                        .unwrap_or("N/A"),
                );
                report.cadastral = Some(record);
                finding
            }
            Err(err) => {
                debug!("Cadastral lookup failed: {err}");
                "CSG: Property not found in database".to_string()
            }
        }
    }
}

struct ApprovedParcelsStep;

#[async_trait]
impl ResearchStep for ApprovedParcelsStep {
    fn id(&self) -> &'static str {
        "approved_parcels"
    }
    fn name(&self) -> &'static str {
        "Approved Parcels"
    }
    fn target_progress(&self) -> u8 {
        28
    }
    fn searching(&self) -> String {
        "Checking approved parcels layer...".to_string()
    }

    async fn run(&self, ctx: &StepContext<'_>, report: &mut PropertyReport) -> String {
        match ctx
            .registry
            .approved_parcel(ctx.location.lon, ctx.location.lat)
            .await
        {
            Ok(record) => {
                let finding = format!(
                    "Approved: {} - {}",
                    record.status.as_deref().unwrap_or("Verified"),
                    record
                        .suburb
                        .as_deref()
                        .or(record.township.as_deref())
                        .unwrap_or("Unknown"),
                );
                report.approved_parcels = Some(record);
                finding
            }
            Err(err) => {
                debug!("Approved parcels lookup failed: {err}");
                "Approved Parcels: Not found".to_string()
            }
        }
    }
}

struct ZoningStep;

#[async_trait]
impl ResearchStep for ZoningStep {
    fn id(&self) -> &'static str {
        "zoning"
    }
    fn name(&self) -> &'static str {
        "Zoning"
    }
    fn target_progress(&self) -> u8 {
        38
    }
    fn searching(&self) -> String {
        "Querying town planning scheme...".to_string()
    }

    async fn run(&self, ctx: &StepContext<'_>, report: &mut PropertyReport) -> String {
        match ctx.registry.zoning(ctx.location.lon, ctx.location.lat).await {
            Ok(record) => {
                let finding = format!(
                    "Zoning: {} - Coverage: {}%, FAR: {}",
                    record.zone_code, record.coverage_percent, record.far,
                );
                report.zoning = Some(record);
                finding
            }
            Err(err) => {
                debug!("Zoning lookup failed: {err}");
                "Zoning: Not found".to_string()
            }
        }
    }
}

struct BuildingsStep;

#[async_trait]
impl ResearchStep for BuildingsStep {
    fn id(&self) -> &'static str {
        "buildings"
    }
    fn name(&self) -> &'static str {
        "Buildings"
    }
    fn target_progress(&self) -> u8 {
        48
    }
    fn searching(&self) -> String {
        "Analyzing existing building footprints...".to_string()
    }

    async fn run(&self, ctx: &StepContext<'_>, report: &mut PropertyReport) -> String {
        match ctx
            .registry
            .buildings(ctx.location.lon, ctx.location.lat)
            .await
        {
            Ok(buildings) if !buildings.is_empty() => {
                let classes: Vec<&str> = buildings.iter().map(|b| b.class.as_str()).collect();
                let finding = format!(
                    "Buildings: {} structure(s) - {}",
                    buildings.len(),
                    classes.join(", "),
                );
                report.buildings = Some(buildings);
                finding
            }
            Ok(buildings) => {
                report.buildings = Some(buildings);
                "Buildings: No existing structures".to_string()
            }
            Err(err) => {
                debug!("Building footprint lookup failed: {err}");
                "Buildings: No existing structures".to_string()
            }
        }
    }
}

struct SurveyDiagramStep;

#[async_trait]
impl ResearchStep for SurveyDiagramStep {
    fn id(&self) -> &'static str {
        "sg_diagram"
    }
    fn name(&self) -> &'static str {
        "SG Diagram"
    }
    fn target_progress(&self) -> u8 {
        58
    }
    fn searching(&self) -> String {
        "Retrieving SG diagram link...".to_string()
    }

    // Derived from the cadastral step's result; no upstream query.
    async fn run(&self, ctx: &StepContext<'_>, report: &mut PropertyReport) -> String {
        match diagram_from_cadastral(report.cadastral.as_ref(), ctx.viewer_url) {
            Some(diagram) => {
                let finding = format!("SG Diagram: Available - {}", diagram.sg_number);
                report.sg_diagram = Some(diagram);
                finding
            }
            None => "SG Diagram: Not available".to_string(),
        }
    }
}

struct FloodStep;

#[async_trait]
impl ResearchStep for FloodStep {
    fn id(&self) -> &'static str {
        "flood"
    }
    fn name(&self) -> &'static str {
        "Flood Risk"
    }
    fn target_progress(&self) -> u8 {
        68
    }
    fn searching(&self) -> String {
        "Checking flood risk zones...".to_string()
    }

    async fn run(&self, ctx: &StepContext<'_>, report: &mut PropertyReport) -> String {
        match ctx.registry.flood(ctx.location.lon, ctx.location.lat).await {
            Ok(record) => {
                let finding = if record.in_flood_zone {
                    "Flood: Property in 100-year flood zone".to_string()
                } else {
                    "Flood: Outside flood zone".to_string()
                };
                report.flood_risk = Some(record);
                finding
            }
            Err(err) => {
                debug!("Flood lookup failed: {err}");
                "Flood: Risk status unknown".to_string()
            }
        }
    }
}

struct RoadsStep;

#[async_trait]
impl ResearchStep for RoadsStep {
    fn id(&self) -> &'static str {
        "roads"
    }
    fn name(&self) -> &'static str {
        "Roads"
    }
    fn target_progress(&self) -> u8 {
        76
    }
    fn searching(&self) -> String {
        "Analyzing nearby roads...".to_string()
    }

    async fn run(&self, ctx: &StepContext<'_>, report: &mut PropertyReport) -> String {
        match ctx.registry.roads(ctx.location.lon, ctx.location.lat).await {
            Ok(roads) if !roads.is_empty() => {
                let names: Vec<&str> = roads
                    .iter()
                    .filter_map(|r| r.name.as_deref())
                    .take(3)
                    .collect();
                let finding = if names.is_empty() {
                    format!("Roads: Found {} road segment(s)", roads.len())
                } else {
                    format!("Roads: {}", names.join(", "))
                };
                report.roads = Some(roads);
                finding
            }
            Ok(roads) => {
                report.roads = Some(roads);
                "Roads: No nearby road data".to_string()
            }
            Err(err) => {
                debug!("Roads lookup failed: {err}");
                "Roads: No nearby road data".to_string()
            }
        }
    }
}

struct SuburbStep;

#[async_trait]
impl ResearchStep for SuburbStep {
    fn id(&self) -> &'static str {
        "suburb"
    }
    fn name(&self) -> &'static str {
        "Suburb"
    }
    fn target_progress(&self) -> u8 {
        84
    }
    fn searching(&self) -> String {
        "Querying suburb overview...".to_string()
    }

    async fn run(&self, ctx: &StepContext<'_>, report: &mut PropertyReport) -> String {
        match ctx.registry.suburb(ctx.location.lon, ctx.location.lat).await {
            Ok(record) => {
                let finding = format!(
                    "Suburb: {}",
                    record.suburb_name.as_deref().unwrap_or("Unknown"),
                );
                report.suburb = Some(record);
                finding
            }
            Err(err) => {
                debug!("Suburb lookup failed: {err}");
                "Suburb: Data not available".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_run_in_the_fixed_order() {
        let ids: Vec<&str> = post_geocode_steps().iter().map(|s| s.id()).collect();
        assert_eq!(
            ids,
            [
                "cadastral",
                "approved_parcels",
                "zoning",
                "buildings",
                "sg_diagram",
                "flood",
                "roads",
                "suburb",
            ]
        );
    }

    #[test]
    fn target_percentages_match_the_published_checkpoints() {
        let targets: Vec<u8> = post_geocode_steps()
            .iter()
            .map(|s| s.target_progress())
            .collect();
        assert_eq!(targets, [18, 28, 38, 48, 58, 68, 76, 84]);
        assert!(targets.windows(2).all(|w| w[0] < w[1]));
    }
}
