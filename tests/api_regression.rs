//! HTTP surface regression tests.
//!
//! Exercises the full router with an in-memory registry stub: health probe,
//! request validation, and a complete SSE research stream read to the end.

use anyhow::anyhow;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use erfscope::api::{create_app, ResearchState};
use erfscope::narrative::{Narrator, ReportDigest};
use erfscope::registry::{RegistryProvider, SourceError, SourceResult};
use erfscope::types::{
    ApprovedParcelRecord, BuildingRecord, CadastralRecord, FloodRecord, Location, RoadRecord,
    SuburbRecord, ZoningRecord,
};
use erfscope::ResearchPipeline;
use std::sync::Arc;
use tower::ServiceExt;

struct EmptyRegistry;

#[async_trait]
impl RegistryProvider for EmptyRegistry {
    async fn geocode(&self, _address: &str) -> SourceResult<Location> {
        Ok(Location {
            display_name: "45 Florida Road, Windermere, Durban".to_string(),
            lat: -29.8293,
            lon: 31.0130,
            suburb: Some("Windermere".to_string()),
            city: "Durban".to_string(),
            province: "KwaZulu-Natal".to_string(),
            country: "South Africa".to_string(),
        })
    }
    async fn cadastral(&self, _lon: f64, _lat: f64) -> SourceResult<CadastralRecord> {
        Err(SourceError::NotFound("not found".to_string()))
    }
    async fn approved_parcel(&self, _lon: f64, _lat: f64) -> SourceResult<ApprovedParcelRecord> {
        Err(SourceError::NotFound("not found".to_string()))
    }
    async fn zoning(&self, _lon: f64, _lat: f64) -> SourceResult<ZoningRecord> {
        Err(SourceError::NotFound("not found".to_string()))
    }
    async fn buildings(&self, _lon: f64, _lat: f64) -> SourceResult<Vec<BuildingRecord>> {
        Ok(vec![])
    }
    async fn flood(&self, _lon: f64, _lat: f64) -> SourceResult<FloodRecord> {
        Ok(FloodRecord {
            in_flood_zone: false,
            zone_type: None,
            risk_level: "Low - Outside flood zone".to_string(),
            attributes: serde_json::Map::new(),
        })
    }
    async fn roads(&self, _lon: f64, _lat: f64) -> SourceResult<Vec<RoadRecord>> {
        Ok(vec![])
    }
    async fn suburb(&self, _lon: f64, _lat: f64) -> SourceResult<SuburbRecord> {
        Err(SourceError::NotFound("not found".to_string()))
    }
}

struct FailingNarrator;

#[async_trait]
impl Narrator for FailingNarrator {
    async fn analyse(&self, _digest: &ReportDigest) -> anyhow::Result<String> {
        Err(anyhow!("unavailable"))
    }
}

fn test_app() -> axum::Router {
    create_app(ResearchState {
        pipeline: ResearchPipeline::new(
            Arc::new(EmptyRegistry),
            Arc::new(FailingNarrator),
            "https://csggis.drdlr.gov.za/psv/".to_string(),
        ),
    })
}

#[tokio::test]
async fn health_reports_service_identity() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "erfscope");
}

#[tokio::test]
async fn research_rejects_a_whitespace_address() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/research")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"address": "  "}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Address is required");
}

#[tokio::test]
async fn research_streams_the_full_event_sequence() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/research")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"address": "45 Florida Road"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("text/event-stream"));

    // The stub pipeline finishes quickly, so the whole stream can be
    // drained in one read.
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains(r#""type":"step-started""#));
    assert!(text.contains(r#""type":"report-ready""#));
    assert!(text.contains(r#""type":"done""#));
    assert!(!text.contains(r#""type":"error""#));

    // Degraded sources still produce their "not found" findings.
    assert!(text.contains("CSG: Property not found in database"));
    assert!(text.contains("Zoning: Not found"));
}
