//! Rights & feasibility engine.
//!
//! Pure, deterministic functions over the assembled registry records. No
//! I/O happens here; the pipeline calls these once all lookups are done.

mod costs;
mod feasibility;
mod recommendations;
mod requirements;
mod rights;
mod summary;

pub use costs::cost_estimate;
pub use feasibility::feasibility;
pub use recommendations::recommendations;
pub use requirements::requirements;
pub use rights::development_rights;
pub use summary::summary;
