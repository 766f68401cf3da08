//! REST API module using Axum
//!
//! Provides the HTTP surface for property research:
//! - `POST /api/v1/research` - run a research pipeline, streaming progress
//!   as Server-Sent Events
//! - `GET /health` - liveness probe

pub mod handlers;
mod routes;

pub use handlers::ResearchState;

use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete application router.
pub fn create_app(state: ResearchState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes(state))
        .merge(routes::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any)
}
