//! Builder for constructing Settings.

use super::{ArtifactLayout, IncludeOptions, Settings, SigningSettings};
use crate::bundler::{ChecksumAlgorithm, Error, PublishingType, WaitUntil};
use std::path::{Path, PathBuf};

/// Default location of the bundle, relative to the working directory.
pub const DEFAULT_BUNDLE_PATH: &str = "target/central-publishing/central-bundle.zip";

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building run settings with validation.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_maven::bundler::{SettingsBuilder, SigningSettings};
///
/// # fn example() -> kodegen_bundler_maven::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .projects_dir("boms")
///     .projects(["platform-bom"])
///     .signing(SigningSettings::disabled())
///     .checksums("MD5", "SHA-256")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    projects_dir: Option<PathBuf>,
    projects: Vec<String>,
    bundle_path: Option<PathBuf>,
    include: IncludeOptions,
    layout: ArtifactLayout,
    signing: SigningSettings,
    checksums: Option<(String, String)>,
    deployment_name: Option<String>,
    publishing_type: PublishingType,
    wait_until: WaitUntil,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the directory holding the project sub-directories.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn projects_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.projects_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the project directory names, in processing order.
    ///
    /// # Required
    ///
    /// At least one project is required.
    pub fn projects<I, S>(mut self, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projects = projects.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the output archive path.
    ///
    /// Default: [`DEFAULT_BUNDLE_PATH`]
    pub fn bundle_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.bundle_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Default: descriptor only
    pub fn include(mut self, include: IncludeOptions) -> Self {
        self.include = include;
        self
    }

    /// Default: [`ArtifactLayout::default`]
    pub fn layout(mut self, layout: ArtifactLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Default: signing enabled with `gpg`, no passphrase
    pub fn signing(mut self, signing: SigningSettings) -> Self {
        self.signing = signing;
        self
    }

    /// Sets the two checksum algorithms by name (e.g. `MD5`, `SHA-1`, `SHA-256`).
    ///
    /// Names are validated by [`build`](Self::build).
    ///
    /// Default: `MD5`, `SHA-1`
    pub fn checksums(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.checksums = Some((first.into(), second.into()));
        self
    }

    /// Default: `group:artifact:version` of the first project
    pub fn deployment_name(mut self, name: impl Into<String>) -> Self {
        self.deployment_name = Some(name.into());
        self
    }

    /// Default: [`PublishingType::UserManaged`]
    pub fn publishing_type(mut self, publishing_type: PublishingType) -> Self {
        self.publishing_type = publishing_type;
        self
    }

    /// Default: [`WaitUntil::Validated`]
    pub fn wait_until(mut self, wait_until: WaitUntil) -> Self {
        self.wait_until = wait_until;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// - `projects_dir` missing
    /// - empty project list ([`Error::InvalidBatch`])
    /// - unknown checksum algorithm ([`Error::UnsupportedAlgorithm`])
    /// - waiting for `published` without automatic publishing ([`Error::InvalidBatch`])
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        if self.projects.is_empty() {
            return Err(Error::InvalidBatch(
                "No projects specified. Provide at least one project directory name.".into(),
            ));
        }
        if let Some(blank) = self.projects.iter().find(|p| p.trim().is_empty()) {
            return Err(Error::InvalidBatch(format!(
                "Project names must not be blank: {blank:?}"
            )));
        }

        let checksums = match self.checksums {
            Some((first, second)) => [first.parse()?, second.parse()?],
            None => [ChecksumAlgorithm::Md5, ChecksumAlgorithm::Sha1],
        };
        if checksums[0] == checksums[1] {
            return Err(Error::InvalidBatch(format!(
                "Checksum algorithms must differ, got {} twice",
                checksums[0]
            )));
        }

        if self.wait_until == WaitUntil::Published
            && self.publishing_type != PublishingType::Automatic
        {
            return Err(Error::InvalidBatch(
                "Cannot wait until published when automatic publishing is disabled".into(),
            ));
        }

        Ok(Settings::new(
            self.projects_dir.context("projects_dir is required")?,
            self.projects,
            self.bundle_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BUNDLE_PATH)),
            self.include,
            self.layout,
            self.signing,
            checksums,
            self.deployment_name,
            self.publishing_type,
            self.wait_until,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = SettingsBuilder::new()
            .projects_dir("boms")
            .projects(["a"])
            .build()
            .unwrap();

        assert_eq!(
            settings.checksums(),
            [ChecksumAlgorithm::Md5, ChecksumAlgorithm::Sha1]
        );
        assert_eq!(settings.bundle_path(), Path::new(DEFAULT_BUNDLE_PATH));
        assert_eq!(settings.include(), IncludeOptions::default());
        assert!(settings.signing().enabled);
        assert_eq!(settings.publishing_type(), PublishingType::UserManaged);
        assert_eq!(settings.wait_until(), WaitUntil::Validated);
        assert_eq!(settings.project_dir("a"), PathBuf::from("boms/a"));
    }

    #[test]
    fn empty_project_list_is_rejected() {
        let err = SettingsBuilder::new()
            .projects_dir("boms")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidBatch(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn unknown_checksum_is_configuration_error() {
        let err = SettingsBuilder::new()
            .projects_dir("boms")
            .projects(["a"])
            .checksums("MD5", "CRC32")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedAlgorithm(ref name) if name == "CRC32"));
    }

    #[test]
    fn published_requires_automatic() {
        let err = SettingsBuilder::new()
            .projects_dir("boms")
            .projects(["a"])
            .wait_until(WaitUntil::Published)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidBatch(_)));

        SettingsBuilder::new()
            .projects_dir("boms")
            .projects(["a"])
            .publishing_type(PublishingType::Automatic)
            .wait_until(WaitUntil::Published)
            .build()
            .unwrap();
    }

    #[test]
    fn projects_dir_is_required() {
        let err = SettingsBuilder::new().projects(["a"]).build().unwrap_err();
        assert!(matches!(err, Error::GenericError(_)));
    }
}
