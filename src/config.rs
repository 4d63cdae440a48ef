//! Tracker configuration
//!
//! Loaded from a TOML file when one exists; every field has a default so a
//! partial file (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Location of the prediction document
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Characters of the statement shown in the pending list
    #[serde(default = "default_statement_preview")]
    pub statement_preview: usize,

    /// Characters of the statement shown when reviewing a new prediction
    #[serde(default = "default_review_preview")]
    pub review_preview: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            statement_preview: default_statement_preview(),
            review_preview: default_review_preview(),
        }
    }
}

// Defaults
fn default_storage_path() -> PathBuf { PathBuf::from("predictions.json") }
fn default_statement_preview() -> usize { 80 }
fn default_review_preview() -> usize { 60 }

impl Config {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `path` if it exists, otherwise return defaults.
    ///
    /// Returns whether the file was found alongside the config.
    pub fn load_or_default(path: &Path) -> anyhow::Result<(Self, bool)> {
        if !path.exists() {
            return Ok((Self::default(), false));
        }
        let content = std::fs::read_to_string(path)?;
        Ok((Self::from_toml(&content)?, true))
    }
}
