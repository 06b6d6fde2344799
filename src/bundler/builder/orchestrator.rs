//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that drives every project
//! of a batch through resolve → collect → sign/checksum → append, all into one
//! shared bundle.

use super::{checksum::ChecksumAlgorithm, processor::DefaultFileProcessor, processor::FileProcessor};
use crate::{
    bundler::{
        BundleBuilder, DeploymentRequest, Error, Settings, ZipBundle,
        collector::{ArtifactCollector, ArtifactFile, ArtifactKind},
        error::{ErrorExt, Result},
        utils::fs::discard_file,
    },
    metadata::{CoordinateResolver, Coordinates, PomResolver},
};
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// One appended bundle entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    /// Path inside the bundle.
    pub path: String,
    pub kind: ArtifactKind,
}

/// Outcome of one project within a batch.
#[derive(Debug, Clone)]
pub struct ProjectReport {
    pub coordinates: Coordinates,
    /// Entries appended for this project, in append order.
    pub entries: Vec<BundleEntry>,
    /// Optional files that were requested but not found.
    pub warnings: Vec<String>,
}

impl ProjectReport {
    /// Number of entries of `kind`.
    pub fn count(&self, kind: ArtifactKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

/// Outcome of a whole batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Sealed bundle.
    pub bundle_path: PathBuf,
    pub projects: Vec<ProjectReport>,
}

impl BatchReport {
    pub fn entry_count(&self) -> usize {
        self.projects.iter().map(|p| p.entries.len()).sum()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.projects
            .iter()
            .flat_map(|p| p.warnings.iter().map(String::as_str))
    }

    /// Builds the uploader hand-off for this bundle.
    ///
    /// The deployment name defaults to the first project's coordinates.
    pub fn deployment_request(&self, settings: &Settings) -> DeploymentRequest {
        let deployment_name = settings
            .deployment_name()
            .map(str::to_string)
            .or_else(|| self.projects.first().map(|p| p.coordinates.to_string()))
            .unwrap_or_else(|| "deployment".to_string());

        DeploymentRequest {
            deployment_name,
            bundle_path: self.bundle_path.clone(),
            publishing_type: settings.publishing_type(),
            wait_until: settings.wait_until(),
        }
    }
}

/// Main bundler orchestrator.
///
/// Processing is strictly sequential: projects in configured order, files in
/// collector order, and for each file: the file, its two checksums, then (when
/// signing) the signature and the signature's two checksums.
///
/// Any fatal error aborts the whole batch; the unfinished bundle is deleted.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_maven::bundler::{Bundler, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_maven::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .projects_dir("boms")
///     .projects(["platform-bom", "tools-bom"])
///     .build()?;
///
/// let report = Bundler::new(settings)?.bundle()?;
/// println!("{} entries in {}", report.entry_count(), report.bundle_path.display());
/// # Ok(())
/// # }
/// ```
pub struct Bundler<R = PomResolver, P = DefaultFileProcessor> {
    settings: Settings,
    resolver: R,
    collector: ArtifactCollector,
    processor: P,
    scratch_dir: PathBuf,
}

impl<R, P> std::fmt::Debug for Bundler<R, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bundler")
            .field("settings", &self.settings)
            .field("collector", &self.collector)
            .field("scratch_dir", &self.scratch_dir)
            .finish_non_exhaustive()
    }
}

impl Bundler {
    /// Creates a bundler with the default `pom.xml` resolver and OpenPGP processor.
    ///
    /// # Errors
    ///
    /// [`Error::SigningToolNotFound`] when signing is enabled and the tool is missing.
    pub fn new(settings: Settings) -> Result<Self> {
        let processor = DefaultFileProcessor::new(settings.signing().clone()).with_resolved_tool()?;
        Ok(Self::with_components(settings, PomResolver::new(), processor))
    }
}

impl<R: CoordinateResolver, P: FileProcessor> Bundler<R, P> {
    /// Creates a bundler from explicit collaborators.
    pub fn with_components(settings: Settings, resolver: R, processor: P) -> Self {
        let collector = ArtifactCollector::new(settings.include(), settings.layout().clone());
        Self {
            settings,
            resolver,
            collector,
            processor,
            scratch_dir: std::env::temp_dir(),
        }
    }

    /// Directory for checksum scratch files.
    ///
    /// Default: the system temp directory
    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Builds the bundle for every configured project.
    ///
    /// # Errors
    ///
    /// The first fatal error of any project; no bundle is left behind.
    pub fn bundle(&self) -> Result<BatchReport> {
        let descriptors = self.preflight()?;
        log::info!(
            "Creating combined deployment bundle for {} project(s)",
            descriptors.len()
        );

        let mut bundle = ZipBundle::create(self.settings.bundle_path())?;

        // An early return drops `bundle`, which deletes the unfinished archive.
        let mut projects = Vec::with_capacity(descriptors.len());
        for (name, descriptor) in &descriptors {
            log::info!("Processing project: {}", name);
            projects.push(self.process_project(descriptor, &mut bundle)?);
        }

        let bundle_path = bundle.finish()?;
        log::info!("Created combined bundle: {}", bundle_path.display());

        Ok(BatchReport {
            bundle_path,
            projects,
        })
    }

    /// Checks that every project directory exists before anything is written.
    fn preflight(&self) -> Result<Vec<(String, PathBuf)>> {
        let layout = self.settings.layout();
        self.settings
            .projects()
            .iter()
            .map(|name| {
                let dir = self.settings.project_dir(name);
                if !dir.is_dir() {
                    return Err(Error::InvalidBatch(format!(
                        "Project directory not found: {}",
                        dir.display()
                    )));
                }
                Ok((name.clone(), dir.join(&layout.descriptor_file_name)))
            })
            .collect()
    }

    /// Processes one project into `bundle`.
    ///
    /// Signature files produced along the way are deleted before returning,
    /// whether processing succeeded or not.
    ///
    /// # Errors
    ///
    /// - [`Error::RequiredFileMissing`] when the descriptor is absent
    /// - descriptor errors from the resolver
    /// - signing, checksum and append failures
    pub fn process_project<B: BundleBuilder>(
        &self,
        descriptor: &Path,
        bundle: &mut B,
    ) -> Result<ProjectReport> {
        if !descriptor.is_file() {
            return Err(Error::RequiredFileMissing {
                kind: ArtifactKind::Descriptor,
                path: descriptor.to_path_buf(),
            });
        }

        let coordinates = self.resolver.resolve(descriptor)?;
        log::info!("  Adding {}", coordinates);

        let project_dir = descriptor.parent().unwrap_or_else(|| Path::new("."));
        let candidates = self.collector.collect(project_dir, &coordinates);

        let mut report = ProjectReport {
            coordinates,
            entries: Vec::new(),
            warnings: Vec::new(),
        };
        let mut signatures = SignatureFiles::default();

        for artifact in &candidates {
            if !artifact.exists() {
                if artifact.kind().is_required() {
                    return Err(Error::RequiredFileMissing {
                        kind: artifact.kind(),
                        path: artifact.source().to_path_buf(),
                    });
                }
                let warning = format!(
                    "{} file not found: {}",
                    artifact.kind(),
                    artifact.source().display()
                );
                log::warn!("    {}", warning);
                report.warnings.push(warning);
                continue;
            }

            log::info!("    Adding {}: {}", artifact.kind(), artifact.target_name());
            self.process_file(artifact, bundle, &mut report, &mut signatures)?;
        }

        Ok(report)
    }

    /// Appends a file, its checksums and, when signing, its signature and the signature's checksums.
    fn process_file<B: BundleBuilder>(
        &self,
        artifact: &ArtifactFile,
        bundle: &mut B,
        report: &mut ProjectReport,
        signatures: &mut SignatureFiles,
    ) -> Result<()> {
        let coordinates = report.coordinates.clone();
        report.entries.push(append_entry(bundle, &coordinates, artifact)?);
        self.append_checksums(artifact, &coordinates, bundle, report)?;

        if !self.processor.signing_enabled() {
            return Ok(());
        }

        let source = artifact.source();
        if let Some(signature) = self.processor.sign(source)? {
            signatures.track(signature.clone());
            if !signature.is_file() {
                return Err(Error::SigningFailed {
                    file: source.to_path_buf(),
                    status: "exit status: 0".into(),
                    output: format!("no signature written to {}", signature.display()),
                });
            }

            let signature = ArtifactFile::new(
                signature,
                format!("{}.{}", artifact.target_name(), super::signing::SIGNATURE_EXTENSION),
                ArtifactKind::Signature,
            );
            report.entries.push(append_entry(bundle, &coordinates, &signature)?);
            self.append_checksums(&signature, &coordinates, bundle, report)?;
        }

        Ok(())
    }

    /// Appends `<target>.<ext>` for both configured algorithms.
    ///
    /// Each digest goes through a scratch file that is removed before returning.
    fn append_checksums<B: BundleBuilder>(
        &self,
        artifact: &ArtifactFile,
        coordinates: &Coordinates,
        bundle: &mut B,
        report: &mut ProjectReport,
    ) -> Result<()> {
        for algorithm in self.settings.checksums() {
            let digest = self.processor.checksum(artifact.source(), algorithm)?;
            let scratch = self.write_scratch(&digest, algorithm)?;

            let checksum = ArtifactFile::new(
                scratch.path().to_path_buf(),
                format!("{}.{}", artifact.target_name(), algorithm.extension()),
                ArtifactKind::Checksum,
            );
            report.entries.push(append_entry(bundle, coordinates, &checksum)?);

            if let Err(e) = scratch.close() {
                log::warn!(
                    "Failed to delete checksum scratch file {}: {}",
                    checksum.source().display(),
                    e
                );
            }
        }

        Ok(())
    }

    fn write_scratch(
        &self,
        digest: &str,
        algorithm: ChecksumAlgorithm,
    ) -> Result<tempfile::NamedTempFile> {
        let mut scratch = tempfile::Builder::new()
            .prefix("checksum-")
            .suffix(&format!(".{}.tmp", algorithm.extension()))
            .tempfile_in(&self.scratch_dir)
            .fs_context("creating checksum scratch file in", &self.scratch_dir)?;
        scratch
            .write_all(digest.as_bytes())
            .and_then(|()| scratch.flush())
            .fs_context("writing checksum scratch file", scratch.path().to_path_buf())?;
        Ok(scratch)
    }
}

fn append_entry<B: BundleBuilder>(
    bundle: &mut B,
    coordinates: &Coordinates,
    artifact: &ArtifactFile,
) -> Result<BundleEntry> {
    let path = bundle.append(artifact.source(), coordinates, artifact.target_name())?;
    log::debug!("      + {} {}", artifact.kind(), path);
    Ok(BundleEntry {
        path,
        kind: artifact.kind(),
    })
}

/// Signature files produced for one project, deleted when dropped.
#[derive(Debug, Default)]
struct SignatureFiles(Vec<PathBuf>);

impl SignatureFiles {
    fn track(&mut self, path: PathBuf) {
        self.0.push(path);
    }
}

impl Drop for SignatureFiles {
    fn drop(&mut self) {
        for signature in self.0.drain(..) {
            discard_file(&signature, "signature file");
        }
    }
}
