//! Shared data structures for the property research pipeline
//!
//! This module defines the value records that flow through a research run:
//! - Registry records (cadastral, zoning, flood, ...) produced by the
//!   source adapters
//! - Derived analysis results (development rights, feasibility, costs)
//! - The top-level `PropertyReport` aggregate
//! - `ProgressEvent`, the typed events pushed over the progress channel

mod analysis;
mod events;
mod report;

pub use analysis::*;
pub use events::*;
pub use report::*;
