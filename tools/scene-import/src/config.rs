//! Import configuration (TOML)
//!
//! ```toml
//! scene = 0
//!
//! [animation]
//! reject_unsorted_timelines = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Scene to import instead of the document's default scene
    #[serde(default)]
    pub scene: Option<usize>,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Drop channels whose keyframe times decrease instead of only warning
    #[serde(default)]
    pub reject_unsorted_timelines: bool,
}

impl ImportConfig {
    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse import config")
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config: {:?}", path))
    }
}
