//! Roads adapter.
//!
//! Envelope query with a wider window than the building lookup; keeps at
//! most the first five segments in upstream order.

use crate::types::{Attributes, RoadRecord};

use super::client::{attr_str, envelope_params, feature_attributes, HttpRegistry};
use super::SourceResult;

const ROAD_FIELDS: &str = "NAME,TYPE,SURFACE";

impl HttpRegistry {
    pub(crate) async fn query_roads(&self, lon: f64, lat: f64) -> SourceResult<Vec<RoadRecord>> {
        let body = self
            .arcgis_query(
                &self.config.endpoints.roads,
                &envelope_params(lon, lat, self.config.query.roads_envelope_deg, ROAD_FIELDS),
            )
            .await?;
        Ok(parse_roads(
            &feature_attributes(&body),
            self.config.query.max_features,
        ))
    }
}

pub(crate) fn parse_roads(features: &[&Attributes], max: usize) -> Vec<RoadRecord> {
    features
        .iter()
        .take(max)
        .map(|attrs| RoadRecord {
            name: attr_str(attrs, "NAME"),
            road_type: attr_str(attrs, "TYPE"),
            attributes: (*attrs).clone(),
        })
        .collect()
}
