//! Typed events pushed over the progress channel.
//!
//! The channel is append-only and strictly ordered; every event carries a
//! monotonically non-decreasing `progress` integer. A run terminates after
//! exactly one of `done` or `error`.

use serde::{Deserialize, Serialize};

use super::PropertyReport;

/// One event on the research progress stream, serialized as `{type, data}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ProgressEvent {
    StepStarted(StepInfo),
    StepSearching(StepQuery),
    StepFinding(StepFinding),
    StepCompleted(StepInfo),
    ReportReady(ReportPayload),
    Done(DonePayload),
    Error(ErrorPayload),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepInfo {
    #[serde(rename = "sourceId")]
    pub source_id: String,
    #[serde(rename = "sourceName")]
    pub source_name: String,
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepQuery {
    #[serde(rename = "sourceId")]
    pub source_id: String,
    #[serde(rename = "sourceName")]
    pub source_name: String,
    pub query: String,
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepFinding {
    #[serde(rename = "sourceId")]
    pub source_id: String,
    #[serde(rename = "sourceName")]
    pub source_name: String,
    pub finding: String,
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPayload {
    pub report: PropertyReport,
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonePayload {
    pub message: String,
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

impl ProgressEvent {
    /// Progress value attached to the event, if it carries one.
    pub fn progress(&self) -> Option<u8> {
        match self {
            Self::StepStarted(e) | Self::StepCompleted(e) => Some(e.progress),
            Self::StepSearching(e) => Some(e.progress),
            Self::StepFinding(e) => Some(e.progress),
            Self::ReportReady(e) => Some(e.progress),
            Self::Done(e) => Some(e.progress),
            Self::Error(_) => None,
        }
    }

    /// Whether this event terminates the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_) | Self::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_events_serialize_with_kebab_type_tag() {
        let event = ProgressEvent::StepFinding(StepFinding {
            source_id: "zoning".to_string(),
            source_name: "Zoning".to_string(),
            finding: "Zoning: Not found".to_string(),
            progress: 38,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "step-finding");
        assert_eq!(json["data"]["sourceId"], "zoning");
        assert_eq!(json["data"]["progress"], 38);
    }

    #[test]
    fn error_event_carries_only_a_message() {
        let event = ProgressEvent::Error(ErrorPayload {
            message: "Address not found".to_string(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["data"]["message"], "Address not found");
        assert!(event.progress().is_none());
        assert!(event.is_terminal());
    }

    #[test]
    fn done_event_round_trips() {
        let event = ProgressEvent::Done(DonePayload {
            message: "Research complete".to_string(),
            progress: 100,
        });
        let json = serde_json::to_string(&event).unwrap();
        let back: ProgressEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.progress(), Some(100));
        assert!(back.is_terminal());
    }
}
