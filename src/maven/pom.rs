//! Minimal POM reader: only the fields that version metadata is derived from.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PACKAGING: &str = "jar";

#[derive(Debug, Error)]
pub enum PomError {
    #[error("failed to read POM file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("POM file {} is malformed: {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomParent {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
}

/// The subset of a POM's `<project>` element that is relevant for repository metadata. Fields
///  are taken as declared, i.e. nothing is inherited from the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomDescriptor {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: String,
    pub name: Option<String>,
    pub parent: Option<PomParent>,
}
impl PomDescriptor {
    pub fn from_xml(xml: &str) -> Result<PomDescriptor, serde_xml_rs::Error> {
        let raw: RawProject = serde_xml_rs::from_str(xml)?;

        Ok(PomDescriptor {
            group_id: non_empty(raw.group_id),
            artifact_id: non_empty(raw.artifact_id),
            version: non_empty(raw.version),
            packaging: non_empty(raw.packaging).unwrap_or_else(|| DEFAULT_PACKAGING.to_string()),
            name: non_empty(raw.name),
            parent: raw.parent.map(|p| PomParent {
                group_id: non_empty(p.group_id),
                artifact_id: non_empty(p.artifact_id),
                version: non_empty(p.version),
            }),
        })
    }
}

pub fn read_pom(path: &Path) -> Result<PomDescriptor, PomError> {
    let xml = fs::read_to_string(path)
        .map_err(|source| PomError::Io { path: path.to_path_buf(), source })?;

    PomDescriptor::from_xml(&xml)
        .map_err(|e| PomError::Malformed { path: path.to_path_buf(), reason: e.to_string() })
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    packaging: Option<String>,
    name: Option<String>,
    parent: Option<RawParent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParent {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
}
