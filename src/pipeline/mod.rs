//! Research pipeline - fixed-order multi-source aggregation.
//!
//! The pipeline drives the registry adapters in a fixed dependency order
//! (geocoding first, everything else sequential for deterministic progress
//! percentages), assembles the report, runs the pure analysis stage, and
//! pushes typed progress events to the consumer.

mod runner;
mod step;

pub use runner::ResearchPipeline;
pub use step::{post_geocode_steps, ResearchStep, StepContext};
