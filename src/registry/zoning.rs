//! Zoning adapter (town planning scheme layer).
//!
//! The layer only reports a raw zone label; the numeric planning parameters
//! come from the static scheme table. An unmatched label resolves to the
//! `Undetermined` entry, never to an error.

use crate::types::{Attributes, ZoningRecord};

use super::client::{attr_str, first_feature, point_params, HttpRegistry};
use super::zoning_table;
use super::{SourceError, SourceResult};

const ZONING_FIELDS: &str =
    "ZONING,REGION,SCHEMENAME,REZONEFROM,AMENDDATE,APPROVDATE,SPZONECODE,NOTES";

impl HttpRegistry {
    pub(crate) async fn query_zoning(&self, lon: f64, lat: f64) -> SourceResult<ZoningRecord> {
        let body = self
            .arcgis_query(
                &self.config.endpoints.zoning,
                &point_params(lon, lat, ZONING_FIELDS),
            )
            .await?;
        let attrs = first_feature(&body)
            .ok_or_else(|| SourceError::NotFound("Not in a scheme area".to_string()))?;
        Ok(parse_zoning(attrs))
    }
}

pub(crate) fn parse_zoning(attrs: &Attributes) -> ZoningRecord {
    let label = attr_str(attrs, "ZONING").unwrap_or_else(|| "Undetermined".to_string());
    let params = zoning_table::lookup(&label);

    ZoningRecord {
        source: "eThekwini Town Planning".to_string(),
        zone_code: attr_str(attrs, "SPZONECODE").unwrap_or_else(|| label.clone()),
        zone_description: params.description.to_string(),
        scheme_name: attr_str(attrs, "SCHEMENAME"),
        region: attr_str(attrs, "REGION"),
        permitted_uses: params.permitted_uses.iter().map(|u| (*u).to_string()).collect(),
        coverage_percent: params.coverage_percent,
        far: params.far,
        height_storeys: params.height_storeys,
        density: params.density.to_string(),
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
    fn known_label_pulls_parameters_from_the_table() {
        let record = parse_zoning(&attrs(json!({
            "ZONING": "IPTN Residential",
            "SCHEMENAME": "BEREA SOUTH",
            "REGION": "Central"
        })));
        assert_eq!(record.zone_code, "IPTN Residential");
        assert_eq!(record.coverage_percent, 60.0);
        assert_eq!(record.far, 1.2);
        assert_eq!(record.height_storeys, 3);
        assert_eq!(record.scheme_name.as_deref(), Some("BEREA SOUTH"));
    }

    #[test]
    fn special_zone_code_takes_precedence_over_the_label() {
        let record = parse_zoning(&attrs(json!({
            "ZONING": "Business 1",
            "SPZONECODE": "B1-CBD"
        })));
        assert_eq!(record.zone_code, "B1-CBD");
        assert_eq!(record.far, 2.0);
    }

    #[test]
    fn unknown_label_falls_back_to_undetermined_defaults() {
        let record = parse_zoning(&attrs(json!({"ZONING": "Future Mixed Use"})));
        assert_eq!(record.coverage_percent, 40.0);
        assert_eq!(record.far, 0.5);
        assert_eq!(record.zone_code, "Future Mixed Use");
    }

    #[test]
    fn missing_label_is_undetermined() {
        let record = parse_zoning(&attrs(json!({})));
        assert_eq!(record.zone_code, "Undetermined");
        assert_eq!(record.density, "Unknown");
    }
}
