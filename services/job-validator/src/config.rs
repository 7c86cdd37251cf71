//! Validator configuration.
//!
//! Loaded from an optional YAML file, then overridden from the environment:
//!
//! | Variable             | Field                       |
//! |----------------------|-----------------------------|
//! | `CMR_URL`            | `cmr.url`                   |
//! | `CMR_PROVIDER`       | `cmr.provider`              |
//! | `DEM_COVERAGE_PATH`  | `coverage.reference_path`   |
//! | `COVERAGE_BUFFER`    | `coverage.buffer`           |
//! | `COVERAGE_THRESHOLD` | `coverage.threshold`        |

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cmr_client::CmrConfig;
use dem_coverage::CoverageParams;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Top-level validator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// CMR connection settings.
    #[serde(default)]
    pub cmr: CmrConfig,

    /// DEM coverage reference and decision parameters.
    #[serde(default)]
    pub coverage: CoverageConfig,
}

/// DEM coverage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// GeoJSON FeatureCollection of DEM-covered areas.
    #[serde(default = "default_reference_path")]
    pub reference_path: PathBuf,

    #[serde(flatten)]
    pub params: CoverageParams,
}

fn default_reference_path() -> PathBuf {
    PathBuf::from("config/dem_coverage.geojson")
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            reference_path: default_reference_path(),
            params: CoverageParams::default(),
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from `path` (if given), apply environment
    /// overrides and validate the result.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "Config file does not exist, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        info!(path = %path.display(), "Loaded validator config");
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply overrides from a variable lookup (normally the environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CMR_URL") {
            self.cmr.url = url;
        }
        if let Some(provider) = lookup("CMR_PROVIDER") {
            self.cmr.provider = provider;
        }
        if let Some(path) = lookup("DEM_COVERAGE_PATH") {
            self.coverage.reference_path = PathBuf::from(path);
        }
        if let Some(buffer) = lookup("COVERAGE_BUFFER") {
            self.coverage.params.buffer = buffer
                .trim()
                .parse()
                .with_context(|| format!("Invalid COVERAGE_BUFFER: {buffer}"))?;
        }
        if let Some(threshold) = lookup("COVERAGE_THRESHOLD") {
            self.coverage.params.threshold = threshold
                .trim()
                .parse()
                .with_context(|| format!("Invalid COVERAGE_THRESHOLD: {threshold}"))?;
        }
        Ok(())
    }

    /// Reject settings the validator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.cmr.url.trim().is_empty() {
            bail!("cmr.url must not be empty");
        }
        if self.cmr.page_size == 0 {
            bail!("cmr.page_size must be positive");
        }

        let CoverageParams { buffer, threshold } = self.coverage.params;
        if !buffer.is_finite() || buffer < 0.0 {
            bail!("coverage.buffer must be a non-negative number, got {buffer}");
        }
        if !(0.0..=1.0).contains(&threshold) {
            bail!("coverage.threshold must be within [0, 1], got {threshold}");
        }
        Ok(())
    }
}
