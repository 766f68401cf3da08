//! Service configuration - registry endpoints and query tuning as TOML values
//!
//! Every upstream URL, the serviceable bounding box, and the query tuning
//! knobs live here so a deployment can be repointed without a rebuild. Each
//! struct implements `Default` with the production eThekwini values, so the
//! service runs with no config file present.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable holding an explicit config path.
const CONFIG_ENV: &str = "ERFSCOPE_CONFIG";

/// Default config file searched in the working directory.
const CONFIG_FILE: &str = "erfscope.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a deployment.
///
/// Load with [`ServiceConfig::load`] which searches:
/// 1. `$ERFSCOPE_CONFIG` env var
/// 2. `./erfscope.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream registry endpoints
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Serviceable bounding box (WGS84)
    #[serde(default)]
    pub bounds: ServiceBounds,

    /// Upstream query tuning
    #[serde(default)]
    pub query: QueryConfig,

    /// Narrative summarizer (optional external collaborator)
    #[serde(default)]
    pub narrative: NarrativeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Upstream registry endpoints.
///
/// The CSG layers use the national cadastral ArcGIS server; the municipal
/// layers live on ArcGIS Online. All accept WGS84 input with `inSR=4326`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub nominatim: String,
    pub csg_erven: String,
    pub csg_farm_portion: String,
    pub csg_viewer: String,
    pub zoning: String,
    pub approved_parcels: String,
    pub building_footprints: String,
    pub roads: String,
    pub suburbs: String,
    pub flood_plain: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            nominatim: "https://nominatim.openstreetmap.org/search".into(),
            csg_erven: "https://csggis.drdlr.gov.za/server/rest/services/Property_Viewer/MapServer/2/query".into(),
            csg_farm_portion: "https://csggis.drdlr.gov.za/server/rest/services/Property_Viewer/MapServer/3/query".into(),
            csg_viewer: "https://csggis.drdlr.gov.za/psv/".into(),
            zoning: "https://services3.arcgis.com/HO0zfySJshlD6Twu/arcgis/rest/services/Zoning/FeatureServer/0/query".into(),
            approved_parcels: "https://services3.arcgis.com/HO0zfySJshlD6Twu/arcgis/rest/services/Approved_Parcels/FeatureServer/5/query".into(),
            building_footprints: "https://services3.arcgis.com/HO0zfySJshlD6Twu/arcgis/rest/services/Building_Footprints/FeatureServer/0/query".into(),
            roads: "https://services3.arcgis.com/HO0zfySJshlD6Twu/arcgis/rest/services/Roads/FeatureServer/0/query".into(),
            suburbs: "https://services3.arcgis.com/HO0zfySJshlD6Twu/arcgis/rest/services/Suburbs/FeatureServer/0/query".into(),
            flood_plain: "https://services3.arcgis.com/HO0zfySJshlD6Twu/arcgis/rest/services/Flood_Plain_100yr/FeatureServer/0/query".into(),
        }
    }
}

/// Bounding box for the serviceable region. Geocoding results outside this
/// box are a hard failure, not a degraded result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ServiceBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Default for ServiceBounds {
    fn default() -> Self {
        // eThekwini metropolitan area
        Self {
            min_lat: -30.25,
            max_lat: -29.45,
            min_lon: 30.70,
            max_lon: 31.25,
        }
    }
}

impl ServiceBounds {
    /// Whether a coordinate falls inside the serviceable region.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

/// Tuning for upstream registry queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Per-request timeout applied to every upstream call
    pub timeout_secs: u64,
    /// User agent sent to all registries
    pub user_agent: String,
    /// Half-width in degrees of the building footprint envelope
    pub building_envelope_deg: f64,
    /// Half-width in degrees of the roads envelope
    pub roads_envelope_deg: f64,
    /// Maximum features kept from an envelope query
    pub max_features: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "ErfscopePropertyAgent/1.0".to_string(),
            building_envelope_deg: 0.0005,
            roads_envelope_deg: 0.002,
            max_features: 5,
        }
    }
}

/// Narrative summarizer configuration.
///
/// When disabled (or no base URL is set) the pipeline uses the static
/// fallback sentence instead of calling out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    pub enabled: bool,
    /// OpenAI-compatible chat-completions base URL, e.g. `https://api.example.com/v1`
    pub base_url: Option<String>,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: None,
            model: "glm-4-flash".to_string(),
            api_key_env: "ERFSCOPE_NARRATIVE_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

// ============================================================================
// Loading & Validation
// ============================================================================

impl ServiceConfig {
    /// Load configuration using the standard search order:
    /// 1. `$ERFSCOPE_CONFIG` environment variable
    /// 2. `./erfscope.toml` in the current working directory
    /// 3. Built-in defaults (production eThekwini endpoints)
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return Self::load_from(&local);
        }
        info!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Load and validate a specific config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Reject configurations that cannot produce a working service.
    pub fn validate(&self) -> Result<()> {
        if self.bounds.min_lat >= self.bounds.max_lat {
            bail!(
                "bounds.min_lat ({}) must be below bounds.max_lat ({})",
                self.bounds.min_lat,
                self.bounds.max_lat
            );
        }
        if self.bounds.min_lon >= self.bounds.max_lon {
            bail!(
                "bounds.min_lon ({}) must be below bounds.max_lon ({})",
                self.bounds.min_lon,
                self.bounds.max_lon
            );
        }
        if self.query.timeout_secs == 0 {
            bail!("query.timeout_secs must be greater than zero");
        }
        if self.query.max_features == 0 {
            bail!("query.max_features must be greater than zero");
        }
        if self.narrative.enabled && self.narrative.base_url.is_none() {
            bail!("narrative.enabled requires narrative.base_url");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.bounds.contains(-29.85, 31.02));
        assert!(!config.bounds.contains(-26.20, 28.05));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nbind_addr = \"127.0.0.1:9090\"\n\n[query]\ntimeout_secs = 10\nuser_agent = \"test\"\nbuilding_envelope_deg = 0.0005\nroads_envelope_deg = 0.002\nmax_features = 3"
        )
        .unwrap();
        let config = ServiceConfig::load_from(file.path()).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9090");
        assert_eq!(config.query.max_features, 3);
        // Untouched sections keep their defaults
        assert_eq!(config.bounds.min_lat, -30.25);
        assert!(config.endpoints.nominatim.contains("nominatim"));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let config = ServiceConfig {
            bounds: ServiceBounds {
                min_lat: -29.0,
                max_lat: -30.0,
                ..ServiceBounds::default()
            },
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn narrative_enabled_without_url_is_rejected() {
        let config = ServiceConfig {
            narrative: NarrativeConfig {
                enabled: true,
                base_url: None,
                ..NarrativeConfig::default()
            },
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
