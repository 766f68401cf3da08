//! Narrative summarizer - best-effort external text generation.
//!
//! Turns the assembled report into a short natural-language paragraph via
//! an OpenAI-compatible chat-completions endpoint. Failure here is always
//! swallowed by the pipeline and replaced with a fixed fallback sentence;
//! it never affects run success.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::OnceLock;
use std::time::Duration;

use crate::config::NarrativeConfig;
use crate::types::PropertyReport;

/// Fallback when the collaborator responds but with blank content.
pub const FALLBACK_EMPTY: &str =
    "Verify development rights with eThekwini Planning before purchase.";

/// Fallback when the collaborator call fails outright.
pub const FALLBACK_UNAVAILABLE: &str =
    "Development potential exists. Contact eThekwini Planning for verification.";

/// Compact digest of the assembled report handed to the collaborator.
#[derive(Debug, Clone)]
pub struct ReportDigest {
    pub address: String,
    pub erf_number: Option<String>,
    pub site_area_sqm: f64,
    pub zone_code: Option<String>,
    pub coverage_percent: f64,
    pub far: f64,
    pub flood_risk: String,
    pub score: i32,
}

impl ReportDigest {
    /// Extract the digest from a report whose derived metrics are populated.
    pub fn from_report(report: &PropertyReport) -> Self {
        let rights = report.development_rights.as_ref();
        Self {
            address: report.address_input.clone(),
            erf_number: report
                .cadastral
                .as_ref()
                .and_then(|c| c.erf_number.clone()),
            site_area_sqm: rights.map_or(0.0, |r| r.site_area_sqm),
            zone_code: report.zoning.as_ref().map(|z| z.zone_code.clone()),
            coverage_percent: rights.map_or(0.0, |r| r.coverage_percent),
            far: rights.map_or(0.0, |r| r.floor_area_ratio),
            flood_risk: report
                .flood_risk
                .as_ref()
                .map_or_else(|| "Unknown".to_string(), |f| f.risk_level.clone()),
            score: report.feasibility.as_ref().map_or(0, |f| f.score),
        }
    }

    /// Prompt text sent as the user message.
    fn prompt(&self) -> String {
        format!(
            "Property: \"{}\" Durban. ERF: {}. Area: {} sqm. Zone: {}. Coverage: {}%. FAR: {}. Flood: {}. Score: {}/100. Give 4 sentences on potential and next steps.",
            self.address,
            self.erf_number.as_deref().unwrap_or("?"),
            self.site_area_sqm,
            self.zone_code.as_deref().unwrap_or("Unknown"),
            self.coverage_percent,
            self.far,
            self.flood_risk,
            self.score,
        )
    }
}

/// Seam for the narrative collaborator; the pipeline converts any `Err`
/// into the fixed fallback sentence.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn analyse(&self, digest: &ReportDigest) -> Result<String>;
}

/// Narrator used when narrative generation is disabled.
pub struct NoopNarrator;

#[async_trait]
impl Narrator for NoopNarrator {
    async fn analyse(&self, _digest: &ReportDigest) -> Result<String> {
        Err(anyhow!("narrative generation disabled"))
    }
}

// Shared across requests; initialized on first use only.
static NARRATIVE_HTTP: OnceLock<reqwest::Client> = OnceLock::new();

/// Narrator backed by an OpenAI-compatible chat-completions endpoint.
pub struct HttpNarrator {
    config: NarrativeConfig,
}

impl HttpNarrator {
    pub fn new(config: NarrativeConfig) -> Self {
        Self { config }
    }

    fn client(&self) -> &'static reqwest::Client {
        NARRATIVE_HTTP.get_or_init(|| {
            reqwest::Client::builder()
                .timeout(Duration::from_secs(self.config.timeout_secs))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new())
        })
    }
}

#[async_trait]
impl Narrator for HttpNarrator {
    async fn analyse(&self, digest: &ReportDigest) -> Result<String> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .context("no narrative endpoint configured")?;
        let api_key = std::env::var(&self.config.api_key_env)
            .with_context(|| format!("missing API key in ${}", self.config.api_key_env))?;

        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": "Durban property consultant."},
                {"role": "user", "content": digest.prompt()},
            ],
            "temperature": 0.7,
            "max_tokens": 300,
        });

        let response = self
            .client()
            .post(format!("{}/chat/completions", base_url.trim_end_matches('/')))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("narrative request failed")?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "narrative endpoint returned status {}",
                response.status()
            ));
        }

        let payload: Value = response.json().await.context("malformed narrative response")?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();
        Ok(content)
    }
}
