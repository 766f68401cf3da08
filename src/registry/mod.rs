//! Source adapters for the upstream geospatial registries.
//!
//! Each adapter wraps one upstream capability (geocoder, cadastral layers,
//! municipal ArcGIS layers) and normalizes its response into a typed record.
//! Faults are values: every adapter returns `Result<_, SourceError>` and
//! never panics or escalates a transport failure.
//!
//! The [`RegistryProvider`] trait is the seam between the pipeline and the
//! live HTTP client, so the orchestration logic is testable against stubs.

pub mod client;
pub mod zoning_table;

mod cadastral;
mod diagram;
mod flood;
mod footprints;
mod geocode;
mod parcels;
mod roads;
mod suburb;
mod zoning;

pub use client::HttpRegistry;
pub use diagram::diagram_from_cadastral;

use crate::types::{
    ApprovedParcelRecord, BuildingRecord, CadastralRecord, FloodRecord, Location, RoadRecord,
    SuburbRecord, ZoningRecord,
};
use async_trait::async_trait;

/// Cadastral extents above this are treated as farm-record noise and
/// dropped rather than propagated into area-based derivations.
pub const MAX_URBAN_EXTENT_SQM: f64 = 100_000.0;

/// Source adapter errors. These never cross the pipeline boundary as
/// failures; the orchestrator turns them into "not found" findings
/// (geocoding excepted, which is fatal to the run).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("upstream timed out")]
    Timeout,
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("{0}")]
    NotFound(String),
    #[error("address resolved outside the eThekwini service area")]
    OutsideServiceArea,
}

impl SourceError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Capability interface over the nine upstream registries.
///
/// Point queries take `(lon, lat)` in WGS84; envelope queries derive their
/// window internally from the configured degree offsets.
#[async_trait]
pub trait RegistryProvider: Send + Sync {
    /// Resolve a free-text address to a location inside the service area.
    async fn geocode(&self, address: &str) -> SourceResult<Location>;

    /// Cadastral parcel at the coordinate (erven layer, farm fallback).
    async fn cadastral(&self, lon: f64, lat: f64) -> SourceResult<CadastralRecord>;

    /// Municipal approved-parcel record at the coordinate.
    async fn approved_parcel(&self, lon: f64, lat: f64) -> SourceResult<ApprovedParcelRecord>;

    /// Town planning scheme zoning at the coordinate.
    async fn zoning(&self, lon: f64, lat: f64) -> SourceResult<ZoningRecord>;

    /// Building footprints near the coordinate (at most 5).
    async fn buildings(&self, lon: f64, lat: f64) -> SourceResult<Vec<BuildingRecord>>;

    /// 100-year flood plain status at the coordinate. Transport failures
    /// degrade to the "Unknown" risk record rather than an error.
    async fn flood(&self, lon: f64, lat: f64) -> SourceResult<FloodRecord>;

    /// Road segments near the coordinate (at most 5).
    async fn roads(&self, lon: f64, lat: f64) -> SourceResult<Vec<RoadRecord>>;

    /// Suburb overview at the coordinate.
    async fn suburb(&self, lon: f64, lat: f64) -> SourceResult<SuburbRecord>;
}
