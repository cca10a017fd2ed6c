use std::cmp::Ordering;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::CollectorConfig;
use crate::maven::coordinates::{is_release_version, is_snapshot, snapshot_base_version};
use crate::maven::diagnostics::{CollectorEvent, DiagnosticsSink};
use crate::maven::metadata_xml::{goal_prefix_from_artifact_id, Plugin, SnapshotVersion, Versioning};
use crate::maven::paths::{expected_pom_file_name, is_artifact_file_candidate, is_pom_file, is_version_directory, parse_artifact_file_name};
use crate::maven::pom::{read_pom, PomDescriptor, PomError};
use crate::maven::version_order::{compare_snapshot_versions, compare_versions};
use crate::util::file_tree::{walk_files, FileTreeError};

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} does not follow the <artifactId>/<version> directory layout", .0.display())]
    NotAnArtifactPath(PathBuf),

    #[error(transparent)]
    Walk(#[from] FileTreeError),
}

/// One version of an artifact, as listed in maven-metadata.xml. Snapshots are always listed with
///  their '-SNAPSHOT' base version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataVersion {
    pub version: String,
    /// last modification of the version directory
    pub created_date: SystemTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    DescriptorMissing,
    DescriptorCorrupt {
        pom_path: PathBuf,
        reason: String,
    },
    /// the POM declares no version of its own
    VersionMissing {
        pom_path: PathBuf,
    },
    DirectoryUnreadable {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedVersionDirectory {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// The result of scanning one artifact directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionCollectionRequest {
    pub artifact_base_path: PathBuf,
    /// sorted by natural version order, may contain the same version more than once
    pub metadata_versions: Vec<MetadataVersion>,
    pub versioning: Versioning,
    pub plugins: Vec<Plugin>,
    pub skipped: Vec<SkippedVersionDirectory>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: MetadataVersion,
    pub plugin: Option<Plugin>,
}

enum VersionDirectoryOutcome {
    Resolved(ResolvedVersion),
    Skipped(SkipReason),
}

/// Collects version information from an artifact's directory in a Maven repository layout, i.e.
///  <artifactId>/<version>/<artifactId>-<version>[-<classifier>].<extension>
///
/// Collection is synchronous and takes no locks; concurrent modifications of the directory tree
///  may or may not be visible in the result.
#[derive(Debug, Clone, Default)]
pub struct VersionCollector {
    config: CollectorConfig,
}
impl VersionCollector {
    pub fn new(config: CollectorConfig) -> VersionCollector {
        VersionCollector {
            config,
        }
    }

    /// Resolves a version for every version directory of the artifact. Version directories
    ///  without a usable POM are skipped and reported in the result, they never fail the whole
    ///  collection.
    pub fn collect_versions(&self, artifact_base_path: &Path, diagnostics: &dyn DiagnosticsSink) -> Result<VersionCollectionRequest, CollectorError> {
        let named_base_path = with_file_names(artifact_base_path)?;
        let artifact_id = file_name_of(&named_base_path)
            .ok_or_else(|| CollectorError::NotAnArtifactPath(artifact_base_path.to_path_buf()))?;

        let mut versions = Vec::new();
        let mut plugins = Vec::new();
        let mut skipped = Vec::new();

        for version_directory in self.version_directories(artifact_base_path)? {
            match self.resolve_version_directory(artifact_id, &version_directory, diagnostics) {
                VersionDirectoryOutcome::Resolved(resolved) => {
                    versions.push(resolved.version);
                    if let Some(plugin) = resolved.plugin {
                        plugins.push(plugin);
                    }
                }
                VersionDirectoryOutcome::Skipped(reason) => {
                    skipped.push(SkippedVersionDirectory {
                        path: version_directory,
                        reason,
                    });
                }
            }
        }

        // 1.1 < 1.2 < 1.3 ...
        sort_metadata_versions(&mut versions);
        let versioning = generate_versioning(&versions);

        debug!("collected {} versions and {} plugins for {}, skipped {} version directories",
            versions.len(), plugins.len(), artifact_base_path.display(), skipped.len());

        Ok(VersionCollectionRequest {
            artifact_base_path: artifact_base_path.to_path_buf(),
            metadata_versions: versions,
            versioning,
            plugins,
            skipped,
        })
    }

    /// All candidate version directories directly below the artifact's base directory, sorted by
    ///  path
    pub fn version_directories(&self, artifact_base_path: &Path) -> Result<Vec<PathBuf>, CollectorError> {
        let to_error = |source| CollectorError::Io { path: artifact_base_path.to_path_buf(), source };

        let mut result = Vec::new();
        for dir_entry in fs::read_dir(artifact_base_path).map_err(to_error)? {
            let path = dir_entry.map_err(to_error)?.path();
            if is_version_directory(&path) {
                result.push(path);
            }
        }
        result.sort();
        Ok(result)
    }

    /// Finds the POM that governs a version directory. For a release version, its name follows
    ///  from the coordinates (whether the file exists is left to the reader). A snapshot directory
    ///  can contain POMs of several timestamped builds, and the last one by name wins.
    pub fn pom_path(&self, artifact_id: &str, version_directory: &Path) -> std::io::Result<Option<PathBuf>> {
        let Some(version_dir_name) = file_name_of(version_directory) else {
            return Ok(None);
        };

        if is_release_version(version_dir_name) {
            let pom_file_name = expected_pom_file_name(artifact_id, version_dir_name, &self.config.pom_extension);
            return Ok(Some(version_directory.join(pom_file_name)));
        }

        let mut pom_file_names = Vec::new();
        for dir_entry in fs::read_dir(version_directory)? {
            let file_name = dir_entry?.file_name();
            if let Some(file_name) = file_name.to_str() {
                if is_pom_file(file_name, &self.config.pom_extension) {
                    pom_file_names.push(file_name.to_string());
                }
            }
        }

        pom_file_names.sort();
        Ok(pom_file_names.pop()
            .map(|file_name| version_directory.join(file_name)))
    }

    /// Derives the metadata version (and plugin information, if any) from a parsed POM.
    ///
    /// Returns `None` for a POM without a version of its own: parent POMs are not consulted.
    pub fn resolve_version(&self, pom: &PomDescriptor, created_date: SystemTime) -> Option<ResolvedVersion> {
        let version = pom.version.as_deref()?;
        let version = if is_snapshot(version) {
            snapshot_base_version(version)
        }
        else {
            version.to_string()
        };

        let plugin = if pom.packaging == self.config.plugin_packaging {
            let artifact_id = pom.artifact_id.clone().unwrap_or_default();
            Some(Plugin {
                name: pom.name.clone().unwrap_or_else(|| artifact_id.clone()),
                prefix: goal_prefix_from_artifact_id(&artifact_id),
                artifact_id,
            })
        }
        else {
            None
        };

        Some(ResolvedVersion {
            version: MetadataVersion {
                version,
                created_date,
            },
            plugin,
        })
    }

    fn resolve_version_directory(&self, artifact_id: &str, version_directory: &Path, diagnostics: &dyn DiagnosticsSink) -> VersionDirectoryOutcome {
        let unreadable = |e: std::io::Error| {
            diagnostics.emit(CollectorEvent::DirectoryUnreadable {
                version_directory: version_directory.to_path_buf(),
                reason: e.to_string(),
            });
            VersionDirectoryOutcome::Skipped(SkipReason::DirectoryUnreadable { reason: e.to_string() })
        };
        let missing = || {
            diagnostics.emit(CollectorEvent::DescriptorMissing {
                version_directory: version_directory.to_path_buf(),
            });
            VersionDirectoryOutcome::Skipped(SkipReason::DescriptorMissing)
        };

        // No pom, no metadata.
        let pom_path = match self.pom_path(artifact_id, version_directory) {
            Ok(Some(pom_path)) => pom_path,
            Ok(None) => return missing(),
            Err(e) => return unreadable(e),
        };

        let pom = match read_pom(&pom_path) {
            Ok(pom) => pom,
            Err(PomError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                return missing();
            }
            Err(e) => {
                let reason = e.to_string();
                diagnostics.emit(CollectorEvent::DescriptorCorrupt {
                    version_directory: version_directory.to_path_buf(),
                    pom_path: pom_path.clone(),
                    reason: reason.clone(),
                });
                return VersionDirectoryOutcome::Skipped(SkipReason::DescriptorCorrupt { pom_path, reason });
            }
        };

        let created_date = match fs::metadata(version_directory).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => return unreadable(e),
        };

        match self.resolve_version(&pom, created_date) {
            Some(resolved) => {
                diagnostics.emit(CollectorEvent::VersionResolved {
                    version_directory: version_directory.to_path_buf(),
                    version: resolved.version.version.clone(),
                });
                if let Some(plugin) = &resolved.plugin {
                    diagnostics.emit(CollectorEvent::PluginDetected {
                        artifact_id: plugin.artifact_id.clone(),
                        prefix: plugin.prefix.clone(),
                    });
                }
                VersionDirectoryOutcome::Resolved(resolved)
            }
            None => {
                diagnostics.emit(CollectorEvent::VersionMissing {
                    version_directory: version_directory.to_path_buf(),
                    pom_path: pom_path.clone(),
                });
                VersionDirectoryOutcome::Skipped(SkipReason::VersionMissing { pom_path })
            }
        }
    }

    /// Snapshot version information for every file of every build in a version directory. All
    ///  entries are stamped with the time of this call.
    ///
    /// Fails if any part of the directory tree can not be read.
    pub fn collect_timestamped_snapshot_versions(&self, version_directory: &Path) -> Result<Vec<SnapshotVersion>, CollectorError> {
        let named_version_directory = with_file_names(version_directory)?;
        let not_an_artifact_path = || CollectorError::NotAnArtifactPath(version_directory.to_path_buf());

        let version_dir_name = file_name_of(&named_version_directory)
            .ok_or_else(not_an_artifact_path)?;
        let artifact_id = named_version_directory.parent()
            .and_then(file_name_of)
            .ok_or_else(not_an_artifact_path)?;

        let files = walk_files(version_directory)?;

        let updated = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let mut snapshot_versions = Vec::new();
        for file_path in files {
            let Some(file_name) = file_name_of(&file_path) else {
                continue;
            };
            if !is_artifact_file_candidate(file_name, &self.config.ignored_extensions) {
                continue;
            }

            match parse_artifact_file_name(file_name, artifact_id, version_dir_name) {
                Ok(file_ref) => {
                    snapshot_versions.push(SnapshotVersion {
                        classifier: file_ref.classifier.as_option().map(|c| c.to_string()),
                        extension: file_ref.extension,
                        version: file_ref.version,
                        updated,
                    });
                }
                Err(e) => {
                    trace!("ignoring {}: {}", file_path.display(), e);
                }
            }
        }

        snapshot_versions.sort_by(compare_snapshot_versions);
        Ok(snapshot_versions)
    }
}

pub fn sort_metadata_versions(versions: &mut [MetadataVersion]) {
    versions.sort_by(|a, b| compare_metadata_versions(&a.version, &b.version));
}

/// Versions that are equal in version order (1 and 1.0) are ordered by their text, so the result
///  does not depend on the input order
fn compare_metadata_versions(a: &str, b: &str) -> Ordering {
    compare_versions(a, b)
        .then_with(|| a.cmp(b))
}

/// The versions list of maven-metadata.xml, in natural version order. Neither 'latest' nor
///  'release' are determined here.
pub fn generate_versioning(versions: &[MetadataVersion]) -> Versioning {
    let mut sorted: Vec<&MetadataVersion> = versions.iter().collect();
    sorted.sort_by(|a, b| compare_metadata_versions(&a.version, &b.version));

    Versioning {
        versions: sorted.into_iter()
            .map(|v| v.version.clone())
            .collect(),
        ..Default::default()
    }
}

/// Leaves `snapshot_versions` unset rather than empty if there are no snapshot versions
pub fn generate_snapshot_versioning(mut snapshot_versions: Vec<SnapshotVersion>) -> Versioning {
    if snapshot_versions.is_empty() {
        return Versioning::default();
    }

    snapshot_versions.sort_by(compare_snapshot_versions);
    Versioning {
        snapshot_versions: Some(snapshot_versions),
        ..Default::default()
    }
}

fn file_name_of(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()
}

/// Paths like '.' or 'x/..' carry no names for artifact or version - canonicalize those
fn with_file_names(path: &Path) -> Result<PathBuf, CollectorError> {
    let has_names = file_name_of(path).is_some()
        && path.parent().and_then(file_name_of).is_some();

    if has_names {
        Ok(path.to_path_buf())
    }
    else {
        fs::canonicalize(path)
            .map_err(|source| CollectorError::Io { path: path.to_path_buf(), source })
    }
}
