//! Maven coordinates (groupId, artifactId, version).

use serde::Serialize;
use std::fmt;

/// Identity of one published artifact.
///
/// Every file placed in a bundle is addressed by the coordinates of the project
/// it belongs to: its entry path is [`Coordinates::repository_path`] followed by
/// the target file name.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_maven::metadata::Coordinates;
///
/// let coords = Coordinates::new("io.kodegen", "core", "1.2.0");
/// assert_eq!(coords.repository_path(), "io/kodegen/core/1.2.0/");
/// assert_eq!(coords.base_file_name(), "core-1.2.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Coordinates {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl Coordinates {
    /// Creates coordinates from their three parts.
    ///
    /// Emptiness is enforced by the resolver, which is the only producer in a run.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Repository-relative directory for this artifact, with a trailing `/`.
    ///
    /// Format: `groupId` with `.` replaced by `/`, then `artifactId`, then `version`.
    pub fn repository_path(&self) -> String {
        format!(
            "{}/{}/{}/",
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version
        )
    }

    /// `artifactId-version`, the stem shared by every file of the artifact.
    pub fn base_file_name(&self) -> String {
        format!("{}-{}", self.artifact_id, self.version)
    }

    /// First field that cannot be used as repository path segments, with its value.
    ///
    /// `artifactId` and `version` must each be a single segment: no `/` or `\`,
    /// not `.` or `..`, no control characters. `groupId` is split on `.`, so every
    /// dot-separated part must be non-empty and free of separators.
    pub fn invalid_field(&self) -> Option<(&'static str, &str)> {
        let group_ok = self.group_id.split('.').all(is_plain_segment);
        let fields = [
            ("groupId", self.group_id.as_str(), group_ok),
            ("artifactId", self.artifact_id.as_str(), is_single_segment(&self.artifact_id)),
            ("version", self.version.as_str(), is_single_segment(&self.version)),
        ];
        fields
            .into_iter()
            .find(|(_, _, ok)| !ok)
            .map(|(field, value, _)| (field, value))
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control())
}

fn is_single_segment(value: &str) -> bool {
    is_plain_segment(value) && value != "." && value != ".."
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
