//! On-disk naming conventions for artifact files.

/// File naming conventions inside a project directory.
///
/// Suffixes are appended to `artifactId-version`. They are configuration, not
/// policy, but stay fixed for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    /// Descriptor file name inside the project directory.
    ///
    /// Default: `pom.xml`
    pub descriptor_file_name: String,

    /// Suffix of the descriptor entry in the bundle.
    ///
    /// Default: `.pom`
    pub descriptor_suffix: String,

    /// Default: `.jar`
    pub binary_suffix: String,

    /// Default: `-sources.jar`
    pub sources_suffix: String,

    /// Default: `-javadoc.jar`
    pub docs_suffix: String,
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self {
            descriptor_file_name: "pom.xml".into(),
            descriptor_suffix: ".pom".into(),
            binary_suffix: ".jar".into(),
            sources_suffix: "-sources.jar".into(),
            docs_suffix: "-javadoc.jar".into(),
        }
    }
}

/// Which optional artifact files to include for every project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncludeOptions {
    /// Primary binary (`.jar`).
    pub binary: bool,
    /// Source bundle (`-sources.jar`).
    pub sources: bool,
    /// Documentation bundle (`-javadoc.jar`).
    pub docs: bool,
}
