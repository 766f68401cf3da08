//! API route definitions
//!
//! - /api/v1/research - property research SSE stream
//! - /health - liveness probe at root level

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, ResearchState};

/// Versioned API routes.
pub fn api_routes(state: ResearchState) -> Router {
    Router::new()
        .route("/research", post(handlers::research))
        .with_state(state)
}

/// Root-level health endpoint.
pub fn health_routes() -> Router {
    Router::new().route("/health", get(handlers::health))
}
