//! Flood plain adapter (100-year flood layer).
//!
//! Point-in-polygon query. Any intersecting feature means the property is
//! in the flood zone; no feature is the affirmative "no risk" result. A
//! transport failure degrades to the safe "Unknown" record instead of
//! surfacing an error - flood status must never abort a run.

use crate::types::{Attributes, FloodRecord};
use serde_json::Map;
use tracing::debug;

use super::client::{attr_str, first_feature, point_params, HttpRegistry};
use super::SourceResult;

pub(crate) const RISK_HIGH: &str = "High - 100yr flood plain";
pub(crate) const RISK_LOW: &str = "Low - Outside flood zone";
pub(crate) const RISK_UNKNOWN: &str = "Unknown";

impl HttpRegistry {
    pub(crate) async fn query_flood(&self, lon: f64, lat: f64) -> SourceResult<FloodRecord> {
        match self
            .arcgis_query(
                &self.config.endpoints.flood_plain,
                &point_params(lon, lat, "*"),
            )
            .await
        {
            Ok(body) => Ok(parse_flood(first_feature(&body))),
            Err(err) => {
                debug!("Flood plain query failed ({err}), reporting unknown risk");
                Ok(FloodRecord {
                    in_flood_zone: false,
                    zone_type: None,
                    risk_level: RISK_UNKNOWN.to_string(),
                    attributes: Map::new(),
                })
            }
        }
    }
}

pub(crate) fn parse_flood(feature: Option<&Attributes>) -> FloodRecord {
    match feature {
        Some(attrs) => FloodRecord {
            in_flood_zone: true,
            zone_type: attr_str(attrs, "TYPE"),
            risk_level: RISK_HIGH.to_string(),
            attributes: attrs.clone(),
        },
        None => FloodRecord {
            in_flood_zone: false,
            zone_type: None,
            risk_level: RISK_LOW.to_string(),
            attributes: Map::new(),
        },
    }
}
