//! Pipeline runner - drives the step list and emits progress events.
//!
//! One runner invocation handles one research request end to end. Events
//! go out on an `mpsc` channel; if the consumer disconnects, the next send
//! fails and the run is abandoned without touching further upstreams.
//!
//! Only geocoding failure is fatal: it emits a terminal `error` event and
//! produces no report. Every other step degrades to an absent report field.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::analysis;
use crate::narrative::{Narrator, ReportDigest, FALLBACK_EMPTY, FALLBACK_UNAVAILABLE};
use crate::registry::RegistryProvider;
use crate::types::{
    DonePayload, ErrorPayload, ProgressEvent, PropertyReport, ReportPayload, StepFinding,
    StepInfo, StepQuery,
};

use super::step::{post_geocode_steps, StepContext};

const COORDINATOR_ID: &str = "coordinator";
const COORDINATOR_NAME: &str = "Coordinator";
const GEOCODER_ID: &str = "geocoder";
const GEOCODER_NAME: &str = "Location";

// Progress checkpoints for the phases the runner owns directly; the
// post-geocode steps each carry their own target percentage.
const PROGRESS_INIT: u8 = 2;
const PROGRESS_GEOCODE: u8 = 8;
const PROGRESS_DERIVE: u8 = 86;
const PROGRESS_SCORE: u8 = 90;
const PROGRESS_NARRATIVE: u8 = 92;
const PROGRESS_REPORT: u8 = 95;
const PROGRESS_DONE: u8 = 100;

/// The consumer dropped the progress channel; abandon the run.
struct ChannelClosed;

/// One research pipeline bound to a registry and a narrator.
///
/// Cheap to clone into request handlers; holds no per-run state.
#[derive(Clone)]
pub struct ResearchPipeline {
    registry: Arc<dyn RegistryProvider>,
    narrator: Arc<dyn Narrator>,
    viewer_url: String,
}

impl ResearchPipeline {
    pub fn new(
        registry: Arc<dyn RegistryProvider>,
        narrator: Arc<dyn Narrator>,
        viewer_url: String,
    ) -> Self {
        Self {
            registry,
            narrator,
            viewer_url,
        }
    }

    /// Run one research request, pushing events until `done` or `error`.
    pub async fn run(&self, address: &str, events: mpsc::Sender<ProgressEvent>) {
        let emitter = Emitter { tx: events };
        if self.drive(address, &emitter).await.is_err() {
            debug!("Research consumer disconnected, abandoning run for \"{address}\"");
        }
    }

    async fn drive(&self, address: &str, tx: &Emitter) -> Result<(), ChannelClosed> {
        let mut report = PropertyReport::new(address);
        info!("Starting property research {} for \"{address}\"", report.report_id);

        tx.started(COORDINATOR_ID, COORDINATOR_NAME, 0).await?;
        tx.finding(
            COORDINATOR_ID,
            COORDINATOR_NAME,
            format!("Initiating property research for \"{address}\" in Durban..."),
            PROGRESS_INIT,
        )
        .await?;

        // Geocoding: the only fatal step. Everything downstream needs the
        // coordinate.
        tx.started(GEOCODER_ID, GEOCODER_NAME, PROGRESS_INIT).await?;
        tx.searching(
            GEOCODER_ID,
            GEOCODER_NAME,
            format!("Geocoding: \"{address}, Durban, South Africa\""),
            PROGRESS_INIT + 1,
        )
        .await?;

        let location = match self.registry.geocode(address).await {
            Ok(location) => location,
            Err(err) => {
                warn!("Geocoding failed for \"{address}\": {err}");
                tx.send(ProgressEvent::Error(ErrorPayload {
                    message: err.to_string(),
                }))
                .await?;
                return Ok(());
            }
        };
        tx.finding(
            GEOCODER_ID,
            GEOCODER_NAME,
            format!("Found: {}", location.display_name),
            PROGRESS_GEOCODE,
        )
        .await?;
        tx.completed(GEOCODER_ID, GEOCODER_NAME, PROGRESS_GEOCODE).await?;
        report.location = Some(location.clone());

        // The eight registry steps, in fixed order. A failed step leaves
        // its report field absent and the run continues.
        let ctx = StepContext {
            registry: self.registry.as_ref(),
            viewer_url: &self.viewer_url,
            location: &location,
        };
        let mut progress = PROGRESS_GEOCODE;
        for step in post_geocode_steps() {
            tx.started(step.id(), step.name(), progress).await?;
            tx.searching(step.id(), step.name(), step.searching(), progress + 1)
                .await?;
            let finding = step.run(&ctx, &mut report).await;
            progress = step.target_progress();
            tx.finding(step.id(), step.name(), finding, progress).await?;
            tx.completed(step.id(), step.name(), progress).await?;
        }

        // Derived metrics: pure and synchronous.
        tx.finding(
            COORDINATOR_ID,
            COORDINATOR_NAME,
            "Calculating development rights and feasibility...".to_string(),
            PROGRESS_DERIVE,
        )
        .await?;

        let rights = analysis::development_rights(
            report.cadastral.as_ref(),
            report.zoning.as_ref(),
            report.approved_parcels.as_ref(),
        );
        let feasibility = analysis::feasibility(
            report.cadastral.as_ref(),
            report.zoning.as_ref(),
            report.sg_diagram.as_ref(),
            report.suburb.as_ref(),
            report.buildings.as_deref(),
            report.flood_risk.as_ref(),
        );
        report.requirements = Some(analysis::requirements());
        report.costs = Some(analysis::cost_estimate(&rights));
        report.recommendations = Some(analysis::recommendations(
            report.cadastral.as_ref(),
            report.zoning.as_ref(),
            report.sg_diagram.as_ref(),
            report.flood_risk.as_ref(),
            &feasibility,
        ));
        report.development_rights = Some(rights.clone());
        report.feasibility = Some(feasibility.clone());

        tx.finding(
            COORDINATOR_ID,
            COORDINATOR_NAME,
            format!(
                "Feasibility Score: {}/100 - {}",
                feasibility.score, feasibility.rating
            ),
            PROGRESS_SCORE,
        )
        .await?;

        // Narrative: best effort. Failure is swallowed and replaced with a
        // fixed fallback sentence; run success is unaffected.
        tx.finding(
            COORDINATOR_ID,
            COORDINATOR_NAME,
            "Generating narrative analysis...".to_string(),
            PROGRESS_NARRATIVE,
        )
        .await?;
        let digest = ReportDigest::from_report(&report);
        let ai_analysis = match self.narrator.analyse(&digest).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => FALLBACK_EMPTY.to_string(),
            Err(err) => {
                debug!("Narrative generation failed: {err:#}");
                FALLBACK_UNAVAILABLE.to_string()
            }
        };

        report.summary = Some(analysis::summary(&report, &rights, &feasibility, ai_analysis));
        report.success = true;

        info!(
            "Research {} complete: score {}/100 ({})",
            report.report_id, feasibility.score, feasibility.rating
        );
        tx.send(ProgressEvent::ReportReady(ReportPayload {
            report,
            progress: PROGRESS_REPORT,
        }))
        .await?;
        tx.completed(COORDINATOR_ID, COORDINATOR_NAME, PROGRESS_DONE).await?;
        tx.send(ProgressEvent::Done(DonePayload {
            message: "Research complete".to_string(),
            progress: PROGRESS_DONE,
        }))
        .await?;
        Ok(())
    }
}

// ============================================================================
// Event emission
// ============================================================================

struct Emitter {
    tx: mpsc::Sender<ProgressEvent>,
}

impl Emitter {
    async fn send(&self, event: ProgressEvent) -> Result<(), ChannelClosed> {
        self.tx.send(event).await.map_err(|_| ChannelClosed)
    }

    async fn started(&self, id: &str, name: &str, progress: u8) -> Result<(), ChannelClosed> {
        self.send(ProgressEvent::StepStarted(StepInfo {
            source_id: id.to_string(),
            source_name: name.to_string(),
            progress,
        }))
        .await
    }

    async fn searching(
        &self,
        id: &str,
        name: &str,
        query: String,
        progress: u8,
    ) -> Result<(), ChannelClosed> {
        self.send(ProgressEvent::StepSearching(StepQuery {
            source_id: id.to_string(),
            source_name: name.to_string(),
            query,
            progress,
        }))
        .await
    }

    async fn finding(
        &self,
        id: &str,
        name: &str,
        finding: String,
        progress: u8,
    ) -> Result<(), ChannelClosed> {
        self.send(ProgressEvent::StepFinding(StepFinding {
            source_id: id.to_string(),
            source_name: name.to_string(),
            finding,
            progress,
        }))
        .await
    }

    async fn completed(&self, id: &str, name: &str, progress: u8) -> Result<(), ChannelClosed> {
        self.send(ProgressEvent::StepCompleted(StepInfo {
            source_id: id.to_string(),
            source_name: name.to_string(),
            progress,
        }))
        .await
    }
}
