//! Maven Central deployment bundle assembly.
//!
//! Turns a batch of project directories into one signed, checksummed zip laid
//! out in repository convention, ready for an uploader to publish atomically.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_maven::bundler::{Bundler, IncludeOptions, SettingsBuilder};
//!
//! # fn example() -> kodegen_bundler_maven::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .projects_dir("boms")
//!     .projects(["platform-bom", "tools-bom"])
//!     .include(IncludeOptions { binary: true, sources: true, docs: true })
//!     .bundle_path("target/central-publishing/central-bundle.zip")
//!     .build()?;
//!
//! let report = Bundler::new(settings.clone())?.bundle()?;
//! let request = report.deployment_request(&settings);
//! println!("{} -> {}", request.deployment_name, request.bundle_path.display());
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod builder;
pub mod collector;
pub mod deployment;
pub mod error;
pub mod settings;
pub(crate) mod utils;

pub use archive::{BundleBuilder, ZipBundle};
pub use builder::{
    BatchReport, BundleEntry, Bundler, ChecksumAlgorithm, DefaultFileProcessor, FileProcessor,
    ProjectReport, calculate_checksum,
};
pub use collector::{ArtifactCollector, ArtifactFile, ArtifactKind};
pub use deployment::{DeploymentRequest, PublishingType, WaitUntil};
pub use error::{Error, Result};
pub use settings::{ArtifactLayout, IncludeOptions, Settings, SettingsBuilder, SigningSettings};
