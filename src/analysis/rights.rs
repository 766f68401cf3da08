//! Development rights derivation.

use crate::registry::MAX_URBAN_EXTENT_SQM;
use crate::types::{ApprovedParcelRecord, CadastralRecord, DevelopmentRights, ZoningRecord};

/// Site areas at or below this are too small to be a credible parcel and
/// are skipped in the fallback chain.
const MIN_PLAUSIBLE_SITE_SQM: f64 = 100.0;

/// Defaults applied when no zoning record is available.
const DEFAULT_COVERAGE_PERCENT: f64 = 50.0;
const DEFAULT_FAR: f64 = 1.0;
const DEFAULT_HEIGHT_STOREYS: u32 = 2;

/// One parking bay per 25 sqm of permitted floor area.
const SQM_PER_PARKING_BAY: f64 = 25.0;

/// Derive development rights from zoning parameters and site area.
///
/// Site area is selected by fallback: the cadastral extent when plausible
/// for an urban parcel, else the approved-parcel area, else zero ("unknown,
/// must be verified"). All area-derived values are zero when the site area
/// is zero.
pub fn development_rights(
    cadastral: Option<&CadastralRecord>,
    zoning: Option<&ZoningRecord>,
    approved: Option<&ApprovedParcelRecord>,
) -> DevelopmentRights {
    let mut site = 0.0;
    if let Some(extent) = cadastral.and_then(|c| c.extent_sqm) {
        if extent > MIN_PLAUSIBLE_SITE_SQM && extent < MAX_URBAN_EXTENT_SQM {
            site = extent;
        }
    }
    if site == 0.0 {
        if let Some(area) = approved.and_then(|a| a.area_sqm) {
            if area > MIN_PLAUSIBLE_SITE_SQM {
                site = area;
            }
        }
    }

    let coverage_percent = zoning.map_or(DEFAULT_COVERAGE_PERCENT, |z| z.coverage_percent);
    let far = zoning.map_or(DEFAULT_FAR, |z| z.far);
    let height = zoning.map_or(DEFAULT_HEIGHT_STOREYS, |z| z.height_storeys);

    let (max_coverage_sqm, max_floor_area_sqm, parking_bays_required) = if site > 0.0 {
        (
            (site * coverage_percent / 100.0).round(),
            (site * far).round(),
            (site * far / SQM_PER_PARKING_BAY).ceil() as u32,
        )
    } else {
        (0.0, 0.0, 0)
    };

    DevelopmentRights {
        site_area_sqm: site.round(),
        max_coverage_sqm,
        max_floor_area_sqm,
        max_height_storeys: height,
        coverage_percent,
        floor_area_ratio: far,
        parking_bays_required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn cadastral(extent_sqm: Option<f64>) -> CadastralRecord {
        CadastralRecord {
            source: "Chief Surveyor General".to_string(),
            erf_number: Some("1417".to_string()),
            township: None,
            farm_name: None,
            portion: None,
            extent_sqm,
            sg_code: None,
            parcel_key: None,
            legal_status: None,
            attributes: Map::new(),
        }
    }

    fn approved(area_sqm: Option<f64>) -> ApprovedParcelRecord {
        ApprovedParcelRecord {
            source: "eThekwini Approved Parcels".to_string(),
            status: None,
            erf_number: None,
            township: None,
            suburb: None,
            street_number: None,
            street_name: None,
            property_id: None,
            area_ha: area_sqm.map(|a| a / 10_000.0),
            area_sqm,
            attributes: Map::new(),
        }
    }

    fn zoning(coverage: f64, far: f64, height: u32) -> ZoningRecord {
        ZoningRecord {
            source: "eThekwini Town Planning".to_string(),
            zone_code: "TEST".to_string(),
            zone_description: String::new(),
            scheme_name: None,
            region: None,
            permitted_uses: vec![],
            coverage_percent: coverage,
            far,
            height_storeys: height,
            density: String::new(),
            attributes: Map::new(),
        }
    }

    #[test]
    fn derives_rights_from_cadastral_extent_and_zoning() {
        let rights = development_rights(
            Some(&cadastral(Some(500.0))),
            Some(&zoning(60.0, 1.2, 3)),
            None,
        );
        assert_eq!(rights.site_area_sqm, 500.0);
        assert_eq!(rights.max_coverage_sqm, 300.0);
        assert_eq!(rights.max_floor_area_sqm, 600.0);
        assert_eq!(rights.parking_bays_required, 24);
        assert_eq!(rights.max_height_storeys, 3);
    }

    #[test]
    fn approved_parcel_area_is_the_fallback_site_source() {
        let rights = development_rights(
            Some(&cadastral(None)),
            None,
            Some(&approved(Some(812.0))),
        );
        assert_eq!(rights.site_area_sqm, 812.0);
        // Zoning absent, so defaults apply
        assert_eq!(rights.coverage_percent, 50.0);
        assert_eq!(rights.floor_area_ratio, 1.0);
        assert_eq!(rights.max_coverage_sqm, 406.0);
    }

    #[test]
    fn implausibly_small_areas_are_skipped() {
        let rights = development_rights(
            Some(&cadastral(Some(80.0))),
            None,
            Some(&approved(Some(50.0))),
        );
        assert_eq!(rights.site_area_sqm, 0.0);
    }

    #[test]
    fn zero_site_area_zeroes_all_derived_values() {
        let rights = development_rights(None, Some(&zoning(60.0, 1.2, 3)), None);
        assert_eq!(rights.site_area_sqm, 0.0);
        assert_eq!(rights.max_coverage_sqm, 0.0);
        assert_eq!(rights.max_floor_area_sqm, 0.0);
        assert_eq!(rights.parking_bays_required, 0);
        // Zoning parameters still pass through
        assert_eq!(rights.max_height_storeys, 3);
        assert_eq!(rights.coverage_percent, 60.0);
    }

    #[test]
    fn coverage_rounds_to_nearest_square_metre() {
        let rights = development_rights(Some(&cadastral(Some(333.0))), Some(&zoning(55.0, 1.0, 2)), None);
        assert_eq!(rights.max_coverage_sqm, (333.0f64 * 0.55).round());
    }
}
