use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SNAPSHOT_REGEX: Regex = Regex::new(r"^(.+)-(?i:snapshot).*$").unwrap();
    static ref TIMESTAMPED_SNAPSHOT_REGEX: Regex = Regex::new(r"^(.+)-(\d{8}\.\d{6})-(\d+)$").unwrap();
}

pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum MavenVersion {
    Release(String),
    /// base version, always ending in the canonical '-SNAPSHOT'
    Snapshot(String),
    TimestampedSnapshot {
        base_version: String, // ending in '-SNAPSHOT'
        timestamp: String,
        build_number: String,
    }
}
impl MavenVersion {
    pub fn parse(version: &str) -> MavenVersion {
        if let Some(captures) = TIMESTAMPED_SNAPSHOT_REGEX.captures(version) {
            return MavenVersion::TimestampedSnapshot {
                base_version: format!("{}{}", &captures[1], SNAPSHOT_SUFFIX),
                timestamp: captures[2].to_string(),
                build_number: captures[3].to_string(),
            };
        }

        if let Some(captures) = SNAPSHOT_REGEX.captures(version) {
            return MavenVersion::Snapshot(format!("{}{}", &captures[1], SNAPSHOT_SUFFIX));
        }

        MavenVersion::Release(version.to_string())
    }

    /// The version under which this version is listed in maven-metadata.xml, i.e. the
    ///  '-SNAPSHOT' form for all kinds of snapshots
    pub fn base_version(&self) -> &str {
        match self {
            MavenVersion::Release(v) => v,
            MavenVersion::Snapshot(v) => v,
            MavenVersion::TimestampedSnapshot { base_version, .. } => base_version,
        }
    }
}

/// true for both '-SNAPSHOT' versions (any case, optionally followed by a qualifier) and
///  timestamped snapshot builds like '1.0-20230101.120000-1'
pub fn is_snapshot(version: &str) -> bool {
    TIMESTAMPED_SNAPSHOT_REGEX.is_match(version) || SNAPSHOT_REGEX.is_match(version)
}

pub fn is_release_version(version: &str) -> bool {
    !is_snapshot(version)
}

pub fn snapshot_base_version(version: &str) -> String {
    MavenVersion::parse(version).base_version().to_string()
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum MavenClassifier {
    Unclassified,
    Classified(String),
}
impl MavenClassifier {
    pub fn as_option(&self) -> Option<&str> {
        match self {
            MavenClassifier::Unclassified => None,
            MavenClassifier::Classified(c) => Some(c.as_str()),
        }
    }
}

/// A single file inside a version directory, parsed back into its coordinates
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ArtifactFileRef {
    /// the version as it appears in the file name - for snapshot builds this is the
    ///  timestamped version, e.g. '1.0-20230101.120000-1'
    pub version: String,
    pub classifier: MavenClassifier,
    /// text after the file name's last '.', without the dot
    pub extension: String,
}
