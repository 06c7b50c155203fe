//! TOML configuration file for lapsewatch
//!
//! Every field is optional; command-line flags override file values and
//! missing values fall back to `DetectorConfig::default()`.

use crate::detector::{DetectorConfig, Granularity};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of a `lapsewatch.toml` file
///
/// # Example TOML
/// ```toml
/// threshold_days = 7
/// granularity = "whole_days"
/// parallel = false
/// roster = ["Alice", "Bob", "Charlie"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LapseConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_days: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<Granularity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,

    /// Expected contributors
    #[serde(default)]
    pub roster: Vec<String>,
}

impl LapseConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file can't be read or isn't valid TOML.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Detector settings with defaults filled in
    pub fn detector_config(&self) -> DetectorConfig {
        let defaults = DetectorConfig::default();
        DetectorConfig {
            threshold_days: self.threshold_days.unwrap_or(defaults.threshold_days),
            granularity: self.granularity.unwrap_or(defaults.granularity),
            parallel: self.parallel.unwrap_or(defaults.parallel),
        }
    }
}
