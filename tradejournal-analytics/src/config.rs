//! Analytics configuration, loaded from TOML.
//!
//! ```toml
//! [metrics]
//! annualization_days = 252
//! holding_time_unit = "hours"
//! missing_session_label = "Unknown"
//!
//! [access]
//! admin_emails = ["admin@example.com"]
//! ```
//!
//! Every key is optional; omitted keys take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tradejournal_core::AccessPolicy;

/// Canonical bucket label for trades without a session.
pub const DEFAULT_MISSING_SESSION_LABEL: &str = "Unknown";

/// Trading days per year used to annualize the Sharpe ratio.
pub const DEFAULT_ANNUALIZATION_DAYS: u32 = 252;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Unit in which average holding time is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldingTimeUnit {
    #[default]
    Hours,
    Minutes,
}

impl HoldingTimeUnit {
    pub fn seconds_per_unit(&self) -> f64 {
        match self {
            HoldingTimeUnit::Hours => 3600.0,
            HoldingTimeUnit::Minutes => 60.0,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            HoldingTimeUnit::Hours => "h",
            HoldingTimeUnit::Minutes => "min",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    pub annualization_days: u32,
    pub holding_time_unit: HoldingTimeUnit,
    pub missing_session_label: String,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            annualization_days: DEFAULT_ANNUALIZATION_DAYS,
            holding_time_unit: HoldingTimeUnit::default(),
            missing_session_label: DEFAULT_MISSING_SESSION_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub metrics: MetricsSettings,
    pub access: AccessPolicy,
}

impl AnalyticsConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metrics.annualization_days == 0 {
            return Err(ConfigError::Invalid(
                "metrics.annualization_days must be positive".into(),
            ));
        }
        if self.metrics.missing_session_label.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "metrics.missing_session_label must not be empty".into(),
            ));
        }
        Ok(())
    }
}
