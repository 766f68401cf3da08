//! Suburb overview adapter. Name and district only.

use crate::types::{Attributes, SuburbRecord};

use super::client::{attr_str, first_feature, point_params, HttpRegistry};
use super::{SourceError, SourceResult};

impl HttpRegistry {
    pub(crate) async fn query_suburb(&self, lon: f64, lat: f64) -> SourceResult<SuburbRecord> {
        let body = self
            .arcgis_query(
                &self.config.endpoints.suburbs,
                &point_params(lon, lat, "SUBURB,DISTRICT"),
            )
            .await?;
        let attrs = first_feature(&body)
            .ok_or_else(|| SourceError::NotFound("Suburb not found".to_string()))?;
        Ok(parse_suburb(attrs))
    }
}

pub(crate) fn parse_suburb(attrs: &Attributes) -> SuburbRecord {
    SuburbRecord {
        suburb_name: attr_str(attrs, "SUBURB"),
        attributes: attrs.clone(),
    }
}
