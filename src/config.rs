use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_POM_EXTENSION: &str = "pom";
pub const DEFAULT_PLUGIN_PACKAGING: &str = "maven-plugin";

/// Settings for collecting versions from a Maven repository layout
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectorConfig {
    /// extension of descriptor files, without '.'
    pub pom_extension: String,
    /// packaging that marks an artifact as a build plugin
    pub plugin_packaging: String,
    /// files with these extensions are never reported as timestamped snapshot builds
    pub ignored_extensions: Vec<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            pom_extension: DEFAULT_POM_EXTENSION.to_string(),
            plugin_packaging: DEFAULT_PLUGIN_PACKAGING.to_string(),
            ignored_extensions: ["md5", "sha1", "sha256", "sha512", "asc"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl CollectorConfig {
    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<CollectorConfig> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("invalid config file {}", path.display()))
    }
}
