//! Approved-parcels adapter (municipal verification layer).
//!
//! The layer reports parcel area in hectares; the adapter always derives
//! `area_sqm` from it so downstream area math never mixes units.

use crate::types::{ApprovedParcelRecord, Attributes};

use super::client::{attr_f64, attr_str, first_feature, point_params, HttpRegistry};
use super::{SourceError, SourceResult};

const APPROVED_FIELDS: &str =
    "ERF,PORTION,FARMTOWNNA,SUBURB,STRNUM,STRNAME,STRTYPE,AREASG,STATUS,DOCREF,PROPERTYID";

impl HttpRegistry {
    pub(crate) async fn query_approved_parcel(
        &self,
        lon: f64,
        lat: f64,
    ) -> SourceResult<ApprovedParcelRecord> {
        let body = self
            .arcgis_query(
                &self.config.endpoints.approved_parcels,
                &point_params(lon, lat, APPROVED_FIELDS),
            )
            .await?;
        let attrs = first_feature(&body)
            .ok_or_else(|| SourceError::NotFound("Not in approved parcels layer".to_string()))?;
        Ok(parse_approved_parcel(attrs))
    }
}

pub(crate) fn parse_approved_parcel(attrs: &Attributes) -> ApprovedParcelRecord {
    // AREASG is in hectares; 1 ha = 10,000 sqm.
    let area_ha = attr_f64(attrs, "AREASG");
    let area_sqm = area_ha.map(|ha| (ha * 10_000.0).round());

    let street_name = match (attr_str(attrs, "STRNAME"), attr_str(attrs, "STRTYPE")) {
        (Some(name), Some(kind)) => Some(format!("{name} {kind}")),
        (Some(name), None) => Some(name),
        (None, Some(kind)) => Some(kind),
        (None, None) => None,
    };

    ApprovedParcelRecord {
        source: "eThekwini Approved Parcels".to_string(),
        status: attr_str(attrs, "STATUS"),
        erf_number: attr_str(attrs, "ERF"),
        township: attr_str(attrs, "FARMTOWNNA"),
        suburb: attr_str(attrs, "SUBURB"),
        street_number: attr_str(attrs, "STRNUM"),
        street_name,
        property_id: attr_str(attrs, "PROPERTYID"),
        area_ha,
        area_sqm,
        attributes: attrs.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: serde_json::Value) -> Attributes {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn hectares_convert_to_square_metres() {
        let record = parse_approved_parcel(&attrs(json!({"AREASG": 1.0})));
        assert_eq!(record.area_ha, Some(1.0));
        assert_eq!(record.area_sqm, Some(10_000.0));
    }

    #[test]
    fn fractional_hectares_round_to_whole_square_metres() {
        let record = parse_approved_parcel(&attrs(json!({"AREASG": 0.08124})));
        assert_eq!(record.area_sqm, Some(812.0));
    }

    #[test]
    fn street_parts_fold_into_one_field() {
        let record = parse_approved_parcel(&attrs(json!({
            "ERF": "1417",
            "STRNUM": "45",
            "STRNAME": "FLORIDA",
            "STRTYPE": "ROAD",
            "STATUS": "Approved",
            "SUBURB": "WINDERMERE"
        })));
        assert_eq!(record.street_name.as_deref(), Some("FLORIDA ROAD"));
        assert_eq!(record.street_number.as_deref(), Some("45"));
        assert_eq!(record.status.as_deref(), Some("Approved"));
        assert_eq!(record.area_sqm, None);
    }
}
