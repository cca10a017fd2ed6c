//! The parts of the maven-metadata.xml format (see
//!  https://maven.apache.org/ref/3.9.5/maven-repository-metadata/repository-metadata.html) that
//!  are derived from an artifact's directory tree. Field names serialize to the XML element names.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref MAVEN_PART_REGEX: Regex = Regex::new(r"-?maven-?").unwrap();
    static ref PLUGIN_PART_REGEX: Regex = Regex::new(r"-?plugin-?").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Versioning {
    // latest / release / lastUpdated are part of the format, but they are not derived from the
    //  directory tree and stay unset here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    pub versions: Vec<String>,

    /// `None` means 'not set', which is different from an empty list for serialization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_versions: Option<Vec<SnapshotVersion>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotVersion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    pub extension: String,
    #[serde(rename = "value")]
    pub version: String,
    /// seconds since the epoch
    pub updated: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    pub name: String,
    pub prefix: String,
    pub artifact_id: String,
}

/// Heuristic for a plugin's goal prefix, e.g. 'maven-compiler-plugin' -> 'compiler'. The
///  authoritative prefix is declared in the plugin jar's META-INF/maven/plugin.xml.
pub fn goal_prefix_from_artifact_id(artifact_id: &str) -> String {
    if artifact_id == "maven-plugin-plugin" {
        return "plugin".to_string();
    }

    let without_maven = MAVEN_PART_REGEX.replace_all(artifact_id, "");
    PLUGIN_PART_REGEX.replace_all(&without_maven, "").into_owned()
}
