//! ERFSCOPE - Property Research Intelligence Service
//!
//! HTTP service that researches a street address across the eThekwini
//! geospatial registries and streams a development feasibility report.
//!
//! # Usage
//!
//! ```bash
//! # Run with built-in production endpoints
//! cargo run --release
//!
//! # Run with a custom config and bind address
//! cargo run --release -- --config ./erfscope.toml --addr 127.0.0.1:9090
//! ```
//!
//! # Environment Variables
//!
//! - `ERFSCOPE_CONFIG`: Path to a TOML config file
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use erfscope::api::{create_app, ResearchState};
use erfscope::narrative::{HttpNarrator, Narrator, NoopNarrator};
use erfscope::registry::HttpRegistry;
use erfscope::{ResearchPipeline, ServiceConfig};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "erfscope")]
#[command(about = "ERFSCOPE Property Research Intelligence Service")]
#[command(version)]
struct CliArgs {
    /// Override the server bind address (default: "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to a TOML config file (overrides $ERFSCOPE_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => ServiceConfig::load_from(path)?,
        None => ServiceConfig::load()?,
    };

    let registry = HttpRegistry::new(&config).context("Failed to build registry client")?;
    let narrator: Arc<dyn Narrator> = if config.narrative.enabled {
        info!("Narrative generation enabled via {:?}", config.narrative.base_url);
        Arc::new(HttpNarrator::new(config.narrative.clone()))
    } else {
        info!("Narrative generation disabled, using fallback text");
        Arc::new(NoopNarrator)
    };

    let pipeline = ResearchPipeline::new(
        Arc::new(registry),
        narrator,
        config.endpoints.csg_viewer.clone(),
    );
    let app = create_app(ResearchState { pipeline });

    let addr = args.addr.unwrap_or_else(|| config.server.bind_addr.clone());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("ERFSCOPE listening on http://{addr}");

    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            shutdown_signal.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("Server error")?;

    info!("ERFSCOPE stopped");
    Ok(())
}
