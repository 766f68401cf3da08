//! ERFSCOPE: Property Research Intelligence
//!
//! Aggregates nine independent geospatial registries for a single street
//! address in the eThekwini municipal area, reconciles inconsistent or
//! missing fields, derives zoning-based development rights and a
//! feasibility score, and streams progress to the caller incrementally.
//!
//! ## Architecture
//!
//! - **Registry Adapters**: one adapter per upstream capability, faults as
//!   values, never exceptions
//! - **Pipeline**: fixed-order step machine with per-step progress
//!   checkpoints pushed over a channel
//! - **Analysis Engine**: pure rights/feasibility/cost/recommendation
//!   derivations
//! - **Narrative**: best-effort external text generation with fixed
//!   fallbacks

pub mod analysis;
pub mod api;
pub mod config;
pub mod narrative;
pub mod pipeline;
pub mod registry;
pub mod types;

// Re-export configuration
pub use config::ServiceConfig;

// Re-export commonly used types
pub use types::{
    ApprovedParcelRecord, BuildingRecord, CadastralRecord, CostEstimate, DevelopmentRights,
    Feasibility, FloodRecord, Location, ProgressEvent, PropertyReport, ReportSummary,
    Requirements, RoadRecord, SuburbRecord, SurveyDiagram, ZoningRecord,
};

// Re-export the pipeline entry point and its seams
pub use narrative::{HttpNarrator, Narrator, NoopNarrator};
pub use pipeline::ResearchPipeline;
pub use registry::{HttpRegistry, RegistryProvider, SourceError};
