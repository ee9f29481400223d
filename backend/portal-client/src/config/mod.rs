pub mod datasets;
pub mod endpoints;
pub mod family;

pub use datasets::DatasetIds;
pub use endpoints::{FamilyEndpoints, PortalEndpoints};
pub use family::{ChartConfig, FamilyConfig, ResourceFamily};

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "portal.toml";

const MAX_TIMEOUT_SECS: u64 = 300;

// ============================================
// CONFIG STRUCTS
// ============================================

/// Everything the portal client needs to reach one reporting portal.
///
/// Built explicitly and handed to [`crate::ReportingPortalClient::new`]; nothing
/// here touches process-wide TLS or proxy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Deadline for each network call (bootstrap GET, query POST).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Skip certificate validation for this portal only.
    ///
    /// The upstream host serves a broken legacy chain, so the shipped
    /// `portal.toml` opts out explicitly. Left `false` unless configured.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "FamilyConfig::products")]
    pub products: FamilyConfig,

    #[serde(default = "FamilyConfig::freight")]
    pub freight: FamilyConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub datasets: DatasetIds,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
            user_agent: default_user_agent(),
            products: FamilyConfig::products(),
            freight: FamilyConfig::freight(),
            chart: ChartConfig::default(),
            datasets: DatasetIds::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_base_url() -> String {
    crate::PORTAL_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    concat!("agro-portal/", env!("CARGO_PKG_VERSION")).to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

impl PortalConfig {
    /// Load config from a TOML file.
    ///
    /// # Returns
    ///
    /// Returns `Ok(PortalConfig)` if loaded successfully or defaults if the file is missing.
    /// Returns `Err(ConfigError)` if the file exists but cannot be read, parsed or validated.
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.to_path_buf(),
                source: e,
            }
        })?;

        let config = Self::parse(&contents, config_path)?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, Path::new("<inline>"))
    }

    fn parse(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: PortalConfig = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            location: ErrorLocation::from(Location::caller()),
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid base_url format: {}", self.base_url),
            });
        }

        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid timeout_secs: {} (must be 1-{})",
                    self.timeout_secs, MAX_TIMEOUT_SECS
                ),
            });
        }

        for (family, paths) in [
            (ResourceFamily::Products, &self.products),
            (ResourceFamily::Freight, &self.freight),
        ] {
            for (field, value) in [
                ("bootstrap_path", &paths.bootstrap_path),
                ("query_path", &paths.query_path),
                ("cda_path", &paths.cda_path),
            ] {
                if !value.starts_with('/') {
                    return Err(ConfigError::ValidationError {
                        location: ErrorLocation::from(Location::caller()),
                        reason: format!("{family}.{field} must be an absolute path, got '{value}'"),
                    });
                }
            }
        }

        if !self.chart.path.starts_with('/') || self.chart.script.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "chart.path must be absolute and chart.script non-empty".to_string(),
            });
        }

        if let Some((name, _)) = self
            .datasets
            .entries()
            .into_iter()
            .find(|(_, id)| id.trim().is_empty())
        {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("datasets.{name} cannot be empty"),
            });
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn family(&self, family: ResourceFamily) -> &FamilyConfig {
        match family {
            ResourceFamily::Products => &self.products,
            ResourceFamily::Freight => &self.freight,
        }
    }
}
