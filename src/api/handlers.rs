//! API request handlers.
//!
//! The research handler validates the request, spawns a pipeline run on a
//! bounded channel, and returns the receiving side as an SSE stream. When
//! the client disconnects the receiver is dropped, which stops the runner
//! at its next event emission.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::info;

use crate::pipeline::ResearchPipeline;

/// Buffered events between the runner and the SSE writer.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Shared state for the research endpoints.
#[derive(Clone)]
pub struct ResearchState {
    pub pipeline: ResearchPipeline,
}

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    pub address: String,
}

/// `POST /api/v1/research` - stream research progress for one address.
pub async fn research(
    State(state): State<ResearchState>,
    Json(request): Json<ResearchRequest>,
) -> Response {
    let address = request.address.trim().to_string();
    if address.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Address is required"})),
        )
            .into_response();
    }
    info!("Research request accepted for \"{address}\"");

    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        pipeline.run(&address, tx).await;
    });

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        Some((Event::default().json_data(&event), rx))
    });
    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}

/// `GET /health` - liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "erfscope",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
