use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoverGuardError, Result};

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".cover-guard.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Coverage profile files to analyze. Profiles from multiple test runs
    /// are merged before any stats are computed.
    #[serde(default)]
    pub profile: Vec<PathBuf>,

    /// Root directory for locating the source files named in profiles.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Prefix stripped from reported file and package names to make them
    /// workspace-independent.
    #[serde(default)]
    pub local_prefix: String,

    /// Files excluded from coverage accounting.
    #[serde(default)]
    pub exclude: ExcludeConfig,

    /// Baseline thresholds per scope.
    #[serde(default)]
    pub threshold: ThresholdConfig,

    /// Path-specific threshold overrides [[override]].
    /// The FIRST matching pattern wins, so entry order matters.
    #[serde(default, rename = "override")]
    pub overrides: Vec<ThresholdOverride>,

    /// Coverage badge rendering.
    #[serde(default)]
    pub badge: BadgeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Vec::new(),
            source_dir: default_source_dir(),
            local_prefix: String::new(),
            exclude: ExcludeConfig::default(),
            threshold: ThresholdConfig::default(),
            overrides: Vec::new(),
            badge: BadgeConfig::default(),
        }
    }
}

impl Config {
    /// Loads a configuration file.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CoverGuardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExcludeConfig {
    /// Regular expressions matched against `/`-normalized profile paths.
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Minimum acceptable coverage percentages, each in `[0, 100]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThresholdConfig {
    /// Per-file baseline.
    #[serde(default)]
    pub file: u32,

    /// Per-package baseline.
    #[serde(default)]
    pub package: u32,

    /// Whole-run baseline.
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThresholdOverride {
    /// Regular expression matched against the reported name.
    pub path: String,

    /// Replacement threshold for matched files and packages.
    pub threshold: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BadgeConfig {
    /// Where to write the rendered SVG badge. Disabled when unset.
    #[serde(default)]
    pub file_name: Option<PathBuf>,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
