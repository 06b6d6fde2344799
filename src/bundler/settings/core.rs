//! Core Settings struct and implementations.

use super::{ArtifactLayout, IncludeOptions, SigningSettings};
use crate::bundler::{ChecksumAlgorithm, PublishingType, WaitUntil};
use std::path::{Path, PathBuf};

/// Main settings for a publishing run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder), then handed to the
/// orchestrator. Nothing in the pipeline reads ambient state; every toggle lives here.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_maven::bundler::{IncludeOptions, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_maven::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .projects_dir("boms")
///     .projects(["platform-bom", "tools-bom"])
///     .include(IncludeOptions { binary: true, ..Default::default() })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Directory containing one sub-directory per project.
    projects_dir: PathBuf,

    /// Project directory names, processed in this order.
    projects: Vec<String>,

    /// Output archive.
    bundle_path: PathBuf,

    include: IncludeOptions,

    layout: ArtifactLayout,

    signing: SigningSettings,

    /// The two digests written next to every entry.
    checksums: [ChecksumAlgorithm; 2],

    /// Human-readable deployment name; derived from the first project when absent.
    deployment_name: Option<String>,

    publishing_type: PublishingType,

    wait_until: WaitUntil,
}

impl Settings {
    pub fn projects_dir(&self) -> &Path {
        &self.projects_dir
    }

    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    /// Directory of a named project.
    pub fn project_dir(&self, project: &str) -> PathBuf {
        self.projects_dir.join(project)
    }

    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    pub fn include(&self) -> IncludeOptions {
        self.include
    }

    pub fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    pub fn signing(&self) -> &SigningSettings {
        &self.signing
    }

    pub fn checksums(&self) -> [ChecksumAlgorithm; 2] {
        self.checksums
    }

    pub fn deployment_name(&self) -> Option<&str> {
        self.deployment_name.as_deref()
    }

    pub fn publishing_type(&self) -> PublishingType {
        self.publishing_type
    }

    pub fn wait_until(&self) -> WaitUntil {
        self.wait_until
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        projects_dir: PathBuf,
        projects: Vec<String>,
        bundle_path: PathBuf,
        include: IncludeOptions,
        layout: ArtifactLayout,
        signing: SigningSettings,
        checksums: [ChecksumAlgorithm; 2],
        deployment_name: Option<String>,
        publishing_type: PublishingType,
        wait_until: WaitUntil,
    ) -> Self {
        Self {
            projects_dir,
            projects,
            bundle_path,
            include,
            layout,
            signing,
            checksums,
            deployment_name,
            publishing_type,
            wait_until,
        }
    }
}
