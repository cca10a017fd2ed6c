use std::path::Path;

use anyhow::anyhow;
use lazy_static::lazy_static;
use regex::Regex;

use crate::maven::coordinates::*;

lazy_static! {
    static ref TIMESTAMP_BUILD_REGEX: Regex = Regex::new(r"^\d{8}\.\d{6}-\d+").unwrap();
}

pub const MAVEN_METADATA_PREFIX: &str = "maven-metadata";


/// Candidate version directories are all non-hidden directories directly below an artifact's
///  base directory
pub fn is_version_directory(path: &Path) -> bool {
    if !path.is_dir() {
        return false;
    }

    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => !name.is_empty() && !name.starts_with('.'),
        None => false,
    }
}

/// `extension` without leading '.'
pub fn has_extension(file_name: &str, extension: &str) -> bool {
    match file_name.strip_suffix(extension) {
        Some(stem) => stem.len() > 1 && stem.ends_with('.'),
        None => false,
    }
}

pub fn is_pom_file(file_name: &str, pom_extension: &str) -> bool {
    !file_name.starts_with('.') && has_extension(file_name, pom_extension)
}

/// The POM of a release version has a fixed name, e.g. 'commons-io-2.11.0.pom'
pub fn expected_pom_file_name(artifact_id: &str, version_dir_name: &str, pom_extension: &str) -> String {
    format!("{}-{}.{}", artifact_id, version_dir_name, pom_extension)
}

/// Pre-filter for files in a version directory that can carry artifact coordinates at all. Names
///  passing this filter still need to parse via [parse_artifact_file_name].
pub fn is_artifact_file_candidate(file_name: &str, ignored_extensions: &[String]) -> bool {
    if file_name.starts_with('.') || file_name.starts_with(MAVEN_METADATA_PREFIX) {
        return false;
    }

    !ignored_extensions.iter()
        .any(|ext| has_extension(file_name, ext))
}

/// Parses the name of a file stored in version directory `version_dir_name` of artifact
///  `artifact_id` back into its coordinates:
///
///  <artifactId>-<version>[-<classifier>].<extension>
///
/// In a snapshot directory ('1.0-SNAPSHOT'), <version> is either the directory name itself or a
///  timestamped build of it ('1.0-20230101.120000-1').
pub fn parse_artifact_file_name(file_name: &str, artifact_id: &str, version_dir_name: &str) -> anyhow::Result<ArtifactFileRef> {
    let full_file_name = file_name;

    let file_name = file_name.strip_prefix(artifact_id)
        .and_then(|s| s.strip_prefix('-'))
        .ok_or_else(|| anyhow!("{} is not a valid maven file name: expected to start with artifact id {}", full_file_name, artifact_id))?;

    let (version, rest) = split_version(file_name, version_dir_name)
        .ok_or_else(|| anyhow!("{} is not a valid maven file name: expected to have version {}", full_file_name, version_dir_name))?;

    // 'a-1.0.1.jar' belongs to version 1.0.1, not to version 1.0
    if rest.strip_prefix('.').map(|s| s.starts_with(|c: char| c.is_ascii_digit())).unwrap_or(false) {
        return Err(anyhow!("{} is not a valid maven file name: version continues beyond {}", full_file_name, version_dir_name));
    }

    let (middle, extension) = match rest.rfind('.') {
        Some(last_dot) => (&rest[..last_dot], &rest[last_dot+1..]),
        None => return Err(anyhow!("{} is not a valid maven file name: no extension", full_file_name)),
    };
    if extension.is_empty() {
        return Err(anyhow!("{} is not a valid maven file name: empty extension", full_file_name));
    }

    let classifier = match middle.strip_prefix('-') {
        Some(raw_classifier) => {
            // NB: for compound extensions like '-bin.tar.gz' the classifier ends at the first '.'
            let classifier = match raw_classifier.find('.') {
                Some(first_dot) => &raw_classifier[..first_dot],
                None => raw_classifier,
            };
            if classifier.is_empty() {
                return Err(anyhow!("{} is not a valid maven file name: empty classifier", full_file_name));
            }
            MavenClassifier::Classified(classifier.to_string())
        }
        None if middle.is_empty() || middle.starts_with('.') => MavenClassifier::Unclassified,
        None => {
            return Err(anyhow!("not a valid maven file name - invalid classifier format: {}", full_file_name));
        }
    };

    Ok(ArtifactFileRef {
        version,
        classifier,
        extension: extension.to_string(),
    })
}

/// returns the version contained in the file name, and the remainder of the file name after it
fn split_version<'a>(file_name: &'a str, version_dir_name: &str) -> Option<(String, &'a str)> {
    if let MavenVersion::Snapshot(base_version) = MavenVersion::parse(version_dir_name) {
        let version_prefix = &base_version[..base_version.len() - SNAPSHOT_SUFFIX.len()];

        let timestamped = file_name.strip_prefix(version_prefix)
            .and_then(|s| s.strip_prefix('-'))
            .and_then(|s| TIMESTAMP_BUILD_REGEX.find(s).map(|m| (m.as_str(), &s[m.end()..])));

        if let Some((timestamp_and_build, rest)) = timestamped {
            return Some((format!("{}-{}", version_prefix, timestamp_and_build), rest));
        }
    }

    file_name.strip_prefix(version_dir_name)
        .map(|rest| (version_dir_name.to_string(), rest))
}


#[cfg(test)]
mod test {
    use rstest::*;
    use super::*;

    fn file_ref(version: &str, classifier: Option<&str>, extension: &str) -> ArtifactFileRef {
        ArtifactFileRef {
            version: version.to_string(),
            classifier: match classifier {
                None => MavenClassifier::Unclassified,
                Some(c) => MavenClassifier::Classified(c.to_string()),
            },
            extension: extension.to_string(),
        }
    }

    #[rstest]
    #[case::release("a-1.0.0.jar", "a", "1.0.0", Some(file_ref("1.0.0", None, "jar")))]
    #[case::release_with_dash("x-y-1.0.0.jar", "x-y", "1.0.0", Some(file_ref("1.0.0", None, "jar")))]
    #[case::release_version_with_dash_suffix("x-1.0.0-y.jar", "x", "1.0.0-y", Some(file_ref("1.0.0-y", None, "jar")))]
    #[case::release_pom("q-1.0.0.pom", "q", "1.0.0", Some(file_ref("1.0.0", None, "pom")))]
    #[case::release_classifier("a-1.0.0-cla.jar", "a", "1.0.0", Some(file_ref("1.0.0", Some("cla"), "jar")))]
    #[case::release_classifier_with_dash("a-1.0.0-cla-rst.jar", "a", "1.0.0", Some(file_ref("1.0.0", Some("cla-rst"), "jar")))]
    #[case::release_compound_extension("a-1.0.0.tar.gz", "a", "1.0.0", Some(file_ref("1.0.0", None, "gz")))]
    #[case::release_classifier_compound_extension("a-1.0.0-bin.tar.gz", "a", "1.0.0", Some(file_ref("1.0.0", Some("bin"), "gz")))]
    #[case::release_invalid_too_short("xxxxxx", "a", "1.0.0", None)]
    #[case::release_invalid_empty("", "a", "1.0.0", None)]
    #[case::release_invalid_wrong_artifact("a-1.0.0.jar", "b", "1.0.0", None)]
    #[case::release_invalid_no_dash_after_artifact("a1.0.0.jar", "a", "1.0.0", None)]
    #[case::release_invalid_wrong_version("a-1.0.0.jar", "a", "1.0.1", None)]
    #[case::release_invalid_no_version("a.jar", "a", "1.0.0", None)]
    #[case::release_invalid_no_dash_before_classifier("a-1.0.0xyz.jar", "a", "1.0.0", None)]
    #[case::release_invalid_no_extension("a-1.0.0", "a", "1.0.0", None)]
    #[case::release_invalid_empty_classifier("a-1.0.0-.jar", "a", "1.0.0", None)]
    #[case::release_invalid_longer_version("a-1.0.0.jar", "a", "1.0", None)]
    #[case::release_invalid_longer_version_classifier("a-1.0.1-sources.jar", "a", "1.0", None)]

    #[case::snapshot_timestamped("x-1.0-20230101.120000-1.jar", "x", "1.0-SNAPSHOT", Some(file_ref("1.0-20230101.120000-1", None, "jar")))]
    #[case::snapshot_timestamped_classifier("x-1.0-20230101.120000-1-sources.jar", "x", "1.0-SNAPSHOT", Some(file_ref("1.0-20230101.120000-1", Some("sources"), "jar")))]
    #[case::snapshot_timestamped_pom("x-1.0-20230101.120000-12.pom", "x", "1.0-SNAPSHOT", Some(file_ref("1.0-20230101.120000-12", None, "pom")))]
    #[case::snapshot_plain("x-1.0-SNAPSHOT.jar", "x", "1.0-SNAPSHOT", Some(file_ref("1.0-SNAPSHOT", None, "jar")))]
    #[case::snapshot_plain_classifier("x-1.0-SNAPSHOT-javadoc.jar", "x", "1.0-SNAPSHOT", Some(file_ref("1.0-SNAPSHOT", Some("javadoc"), "jar")))]
    #[case::snapshot_lowercase_directory("x-1.0-20230101.120000-1.jar", "x", "1.0-snapshot", Some(file_ref("1.0-20230101.120000-1", None, "jar")))]
    #[case::snapshot_invalid_wrong_base("x-1.1-20230101.120000-1.jar", "x", "1.0-SNAPSHOT", None)]
    #[case::snapshot_invalid_timestamp_without_build("x-1.0-20230101.120000.jar", "x", "1.0-SNAPSHOT", None)]
    #[case::snapshot_invalid_longer_timestamped_build("x-1.0-20230101.120000-1.1.jar", "x", "1.0-SNAPSHOT", None)]
    #[case::snapshot_invalid_wrong_artifact("x-1.0-20230101.120000-1.jar", "y", "1.0-SNAPSHOT", None)]
    fn test_parse_artifact_file_name(#[case] file_name: &str, #[case] artifact_id: &str, #[case] version_dir_name: &str, #[case] expected: Option<ArtifactFileRef>) {
        let actual = parse_artifact_file_name(file_name, artifact_id, version_dir_name);

        if let Some(expected) = expected {
            assert_eq!(actual.unwrap(), expected);
        }
        else {
            assert!(actual.is_err());
        }
    }

    #[rstest]
    #[case::pom("a-1.0.pom", true)]
    #[case::jar("a-1.0.jar", false)]
    #[case::pom_checksum("a-1.0.pom.sha1", false)]
    #[case::bare_extension(".pom", false)]
    #[case::hidden(".a-1.0.pom", false)]
    #[case::suffix_without_dot("a-1.0pom", false)]
    fn test_is_pom_file(#[case] file_name: &str, #[case] expected: bool) {
        assert_eq!(is_pom_file(file_name, "pom"), expected);
    }

    #[rstest]
    #[case::jar("a-1.0.jar", true)]
    #[case::pom("a-1.0.pom", true)]
    #[case::sha1("a-1.0.jar.sha1", false)]
    #[case::md5("a-1.0.pom.md5", false)]
    #[case::signature("a-1.0.jar.asc", false)]
    #[case::metadata("maven-metadata.xml", false)]
    #[case::local_metadata("maven-metadata-local.xml", false)]
    #[case::hidden(".lastUpdated", false)]
    fn test_is_artifact_file_candidate(#[case] file_name: &str, #[case] expected: bool) {
        let ignored = vec!["md5".to_string(), "sha1".to_string(), "asc".to_string()];
        assert_eq!(is_artifact_file_candidate(file_name, &ignored), expected);
    }

    #[test]
    fn test_expected_pom_file_name() {
        assert_eq!(expected_pom_file_name("commons-io", "2.11.0", "pom"), "commons-io-2.11.0.pom");
    }
}
