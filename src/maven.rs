//! Version metadata for artifacts stored in a Maven repository layout on the local file system.

pub mod coordinates;
pub mod diagnostics;
pub mod metadata_xml;
pub mod paths;
pub mod pom;
pub mod version_collector;
pub mod version_order;

pub use version_collector::{
    generate_snapshot_versioning, generate_versioning, CollectorError, MetadataVersion, SkipReason,
    SkippedVersionDirectory, VersionCollectionRequest, VersionCollector,
};
