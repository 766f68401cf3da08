//! Cadastral adapter (Chief Surveyor General).
//!
//! Queries the national erven layer first and falls back to the
//! farm/portion layer when the primary query fails or comes back empty.
//! Only one successful source is kept per run.

use crate::types::{Attributes, CadastralRecord};
use tracing::debug;

use super::client::{attr_f64, attr_str, first_feature, point_params, HttpRegistry};
use super::{SourceError, SourceResult, MAX_URBAN_EXTENT_SQM};

const CSG_FIELDS: &str = "PARCEL_NO,SS_NAME,FARM_NAME,PORTION,PRCL_KEY,PRCL_TYPE,LSTATUS,PROVINCE,GEOM_AREA";

impl HttpRegistry {
    pub(crate) async fn query_cadastral(&self, lon: f64, lat: f64) -> SourceResult<CadastralRecord> {
        let params = point_params(lon, lat, CSG_FIELDS);

        match self
            .arcgis_query(&self.config.endpoints.csg_erven, &params)
            .await
        {
            Ok(body) => {
                if let Some(attrs) = first_feature(&body) {
                    return Ok(parse_erven(attrs));
                }
                debug!("Erven layer returned no features, trying farm/portion layer");
            }
            Err(err) => debug!("Erven layer query failed ({err}), trying farm/portion layer"),
        }

        let body = self
            .arcgis_query(&self.config.endpoints.csg_farm_portion, &params)
            .await?;
        let attrs = first_feature(&body)
            .ok_or_else(|| SourceError::NotFound("Parcel not in CSG database".to_string()))?;
        Ok(parse_farm_portion(attrs))
    }
}

/// Parse an erven-layer feature.
pub(crate) fn parse_erven(attrs: &Attributes) -> CadastralRecord {
    CadastralRecord {
        source: "Chief Surveyor General".to_string(),
        erf_number: attr_str(attrs, "PARCEL_NO"),
        township: attr_str(attrs, "SS_NAME"),
        farm_name: attr_str(attrs, "FARM_NAME"),
        portion: attr_str(attrs, "PORTION"),
        extent_sqm: clamped_extent(attrs),
        sg_code: attr_str(attrs, "PRCL_KEY"),
        parcel_key: attr_str(attrs, "PRCL_KEY"),
        legal_status: Some(legal_status(attrs)),
        attributes: attrs.clone(),
    }
}

/// Parse a farm/portion-layer feature.
pub(crate) fn parse_farm_portion(attrs: &Attributes) -> CadastralRecord {
    CadastralRecord {
        source: "CSG Farm".to_string(),
        erf_number: None,
        township: None,
        farm_name: attr_str(attrs, "FARM_NAME"),
        portion: attr_str(attrs, "PORTION"),
        extent_sqm: clamped_extent(attrs),
        sg_code: attr_str(attrs, "PRCL_KEY"),
        parcel_key: attr_str(attrs, "PRCL_KEY"),
        legal_status: Some(legal_status(attrs)),
        attributes: attrs.clone(),
    }
}

/// Geometric area, with implausible farm-scale extents treated as absent.
fn clamped_extent(attrs: &Attributes) -> Option<f64> {
    attr_f64(attrs, "GEOM_AREA").filter(|area| *area <= MAX_URBAN_EXTENT_SQM)
}

/// Binary registry status code mapped to a human label.
fn legal_status(attrs: &Attributes) -> String {
    match attr_str(attrs, "LSTATUS").as_deref() {
        Some("S" | "R") => "Registered".to_string(),
        _ => "Unregistered".to_string(),
    }
}
