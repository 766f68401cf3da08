//! Building footprints adapter.
//!
//! Envelope query around the coordinate; entries with a blank
//! classification are dropped and at most the first five valid footprints
//! are kept in upstream order. An empty result is success, not an error.

use crate::types::{Attributes, BuildingRecord};

use super::client::{attr_f64, attr_str, envelope_params, feature_attributes, HttpRegistry};
use super::SourceResult;

const FOOTPRINT_FIELDS: &str = "Class,SYear,RoofArea";

impl HttpRegistry {
    pub(crate) async fn query_buildings(
        &self,
        lon: f64,
        lat: f64,
    ) -> SourceResult<Vec<BuildingRecord>> {
        let body = self
            .arcgis_query(
                &self.config.endpoints.building_footprints,
                &envelope_params(
                    lon,
                    lat,
                    self.config.query.building_envelope_deg,
                    FOOTPRINT_FIELDS,
                ),
            )
            .await?;
        Ok(parse_buildings(
            &feature_attributes(&body),
            self.config.query.max_features,
        ))
    }
}

pub(crate) fn parse_buildings(features: &[&Attributes], max: usize) -> Vec<BuildingRecord> {
    features
        .iter()
        .filter_map(|attrs| {
            let class = attr_str(attrs, "Class")?;
            Some(BuildingRecord {
                class,
                year: attr_f64(attrs, "SYear").map(|y| y as i64),
                roof_area_sqm: attr_f64(attrs, "RoofArea"),
                attributes: (*attrs).clone(),
            })
        })
        .take(max)
        .collect()
}
