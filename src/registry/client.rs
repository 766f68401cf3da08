//! HTTP client over the upstream registries.
//!
//! `HttpRegistry` owns one `reqwest::Client` with the configured timeout and
//! user agent, plus the shared ArcGIS query plumbing. The per-source query
//! and parse logic lives in the sibling modules; this file wires them into
//! the [`RegistryProvider`] trait.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::config::ServiceConfig;
use crate::types::{
    ApprovedParcelRecord, Attributes, BuildingRecord, CadastralRecord, FloodRecord, Location,
    RoadRecord, SuburbRecord, ZoningRecord,
};

use super::{RegistryProvider, SourceError, SourceResult};

/// Live HTTP adapter set over the configured registry endpoints.
pub struct HttpRegistry {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ServiceConfig,
}

impl HttpRegistry {
    /// Build the client with the configured timeout and user agent.
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.query.timeout_secs))
            .user_agent(config.query.user_agent.clone())
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Run an ArcGIS feature query, forcing WGS84 in/out and JSON format.
    ///
    /// Upstream-reported errors (`{"error": ...}` bodies) are surfaced as
    /// `SourceError::Upstream`, never as a parse failure.
    pub(crate) async fn arcgis_query(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> SourceResult<Value> {
        let mut query: Vec<(&str, String)> = params.to_vec();
        for (key, value) in [("inSR", "4326"), ("outSR", "4326"), ("f", "json")] {
            if !query.iter().any(|(k, _)| *k == key) {
                query.push((key, value.to_string()));
            }
        }

        let response = self
            .http
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(SourceError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }
        let body: Value = response.json().await.map_err(SourceError::from_reqwest)?;
        if let Some(err) = body.get("error") {
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("ArcGIS error");
            return Err(SourceError::Upstream(message.to_string()));
        }
        Ok(body)
    }
}

#[async_trait]
impl RegistryProvider for HttpRegistry {
    async fn geocode(&self, address: &str) -> SourceResult<Location> {
        self.query_geocode(address).await
    }

    async fn cadastral(&self, lon: f64, lat: f64) -> SourceResult<CadastralRecord> {
        self.query_cadastral(lon, lat).await
    }

    async fn approved_parcel(&self, lon: f64, lat: f64) -> SourceResult<ApprovedParcelRecord> {
        self.query_approved_parcel(lon, lat).await
    }

    async fn zoning(&self, lon: f64, lat: f64) -> SourceResult<ZoningRecord> {
        self.query_zoning(lon, lat).await
    }

    async fn buildings(&self, lon: f64, lat: f64) -> SourceResult<Vec<BuildingRecord>> {
        self.query_buildings(lon, lat).await
    }

    async fn flood(&self, lon: f64, lat: f64) -> SourceResult<FloodRecord> {
        self.query_flood(lon, lat).await
    }

    async fn roads(&self, lon: f64, lat: f64) -> SourceResult<Vec<RoadRecord>> {
        self.query_roads(lon, lat).await
    }

    async fn suburb(&self, lon: f64, lat: f64) -> SourceResult<SuburbRecord> {
        self.query_suburb(lon, lat).await
    }
}

// ============================================================================
// Shared query/parse helpers
// ============================================================================

/// Query parameters for a point-in-polygon feature lookup.
pub(crate) fn point_params(lon: f64, lat: f64, out_fields: &str) -> Vec<(&'static str, String)> {
    vec![
        ("geometry", format!("{lon},{lat}")),
        ("outFields", out_fields.to_string()),
    ]
}

/// Query parameters for a bounding-envelope feature lookup.
pub(crate) fn envelope_params(
    lon: f64,
    lat: f64,
    half_width: f64,
    out_fields: &str,
) -> Vec<(&'static str, String)> {
    vec![
        (
            "geometry",
            format!(
                "{},{},{},{}",
                lon - half_width,
                lat - half_width,
                lon + half_width,
                lat + half_width
            ),
        ),
        ("geometryType", "esriGeometryEnvelope".to_string()),
        ("outFields", out_fields.to_string()),
    ]
}

/// Attribute maps of all features in a query response, in upstream order.
pub(crate) fn feature_attributes(body: &Value) -> Vec<&Attributes> {
    body.get("features")
        .and_then(Value::as_array)
        .map(|features| {
            features
                .iter()
                .filter_map(|f| f.get("attributes").and_then(Value::as_object))
                .collect()
        })
        .unwrap_or_default()
}

/// Attribute map of the first feature, if any.
pub(crate) fn first_feature(body: &Value) -> Option<&Attributes> {
    feature_attributes(body).into_iter().next()
}

/// String attribute, accepting numeric values (ArcGIS mixes both).
pub(crate) fn attr_str(attrs: &Attributes, key: &str) -> Option<String> {
    match attrs.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric attribute, accepting stringified numbers.
pub(crate) fn attr_f64(attrs: &Attributes, key: &str) -> Option<f64> {
    match attrs.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
