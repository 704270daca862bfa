//! Connection settings
//!
//! Settings come from an optional TOML file and are validated into a
//! [`ConnectionConfig`] before the pipeline runs:
//!
//! ```toml
//! hub = "NUM"
//!
//! [thresholds]
//! min_connect_minutes = 60
//! max_connect_minutes = 240
//! max_missed_connect_minutes = -120
//! max_circuity = 1.5
//! max_abs_circuity_km = 1200
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::classifier::Thresholds;
use hubconn_common::{Error, Result};

/// Threshold settings as written in the settings file, with times in minutes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdSettings {
    pub min_connect_minutes: f64,
    pub max_connect_minutes: f64,
    /// Lower bound of the missed window, usually negative
    pub max_missed_connect_minutes: f64,
    /// Multiple of the direct distance
    pub max_circuity: f64,
    pub max_abs_circuity_km: f64,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            min_connect_minutes: 60.0,
            max_connect_minutes: 240.0,
            max_missed_connect_minutes: -120.0,
            max_circuity: 1.5,
            max_abs_circuity_km: 1200.0,
        }
    }
}

/// Settings file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionSettings {
    pub hub: String,
    pub thresholds: ThresholdSettings,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            hub: "NUM".to_string(),
            thresholds: ThresholdSettings::default(),
        }
    }
}

impl ConnectionSettings {
    /// Parse settings from TOML text; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::configuration(format!("invalid settings: {e}")))
    }

    /// Read settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("cannot read settings {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Validate into the configuration the pipeline runs with
    pub fn to_config(&self) -> Result<ConnectionConfig> {
        let hub = self.hub.trim();
        if hub.is_empty() {
            return Err(Error::configuration("hub airport code is empty"));
        }
        let t = &self.thresholds;
        Ok(ConnectionConfig {
            hub: hub.to_string(),
            thresholds: Thresholds::from_minutes(
                t.min_connect_minutes,
                t.max_connect_minutes,
                t.max_missed_connect_minutes,
                t.max_circuity,
                t.max_abs_circuity_km,
            )?,
        })
    }
}

/// Validated hub and thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionConfig {
    pub hub: String,
    pub thresholds: Thresholds,
}
