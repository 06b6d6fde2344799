//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, and the translation of
//! arguments into bundler [`Settings`].

use crate::bundler::{
    IncludeOptions, PublishingType, Settings, SettingsBuilder, SigningSettings, WaitUntil,
};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Bundles descriptor-only (BOM) projects for a Maven Central deployment
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_maven",
    version,
    about = "Bundles descriptor-only projects into a Maven Central deployment archive",
    long_about = "Collects the pom.xml (and optionally jars) of each project, signs every file,
writes MD5/SHA-1 checksums, and packs everything into one zip laid out in repository
convention (group/path/artifact/version/file).

Usage:
  kodegen_bundler_maven --projects-dir boms --project platform-bom --project tools-bom
  kodegen_bundler_maven --projects-dir boms --project platform-bom --skip-sign --json
  kodegen_bundler_maven --projects-dir . --project core --include-jar --auto-publish

Exit code 0 = bundle sealed at the output path (or the run was skipped)."
)]
pub struct Args {
    /// Directory holding one sub-directory per project
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub projects_dir: PathBuf,

    /// Project directory name under --projects-dir (repeatable or comma-separated)
    #[arg(short, long = "project", value_name = "NAME", value_delimiter = ',')]
    pub projects: Vec<String>,

    /// Output directory; the bundle is written to <DIR>/central-publishing/central-bundle.zip
    #[arg(short, long, value_name = "DIR", default_value = "target")]
    pub output: PathBuf,

    /// Also bundle <artifact>-<version>.jar
    #[arg(long)]
    pub include_jar: bool,

    /// Also bundle <artifact>-<version>-sources.jar
    #[arg(long)]
    pub include_sources: bool,

    /// Also bundle <artifact>-<version>-javadoc.jar
    #[arg(long)]
    pub include_javadoc: bool,

    /// Do not produce detached signatures
    #[arg(long)]
    pub skip_sign: bool,

    /// OpenPGP signing executable
    #[arg(long, value_name = "PATH", default_value = "gpg")]
    pub gpg_executable: String,

    /// Passphrase of the signing key
    #[arg(long, env = "GPG_PASSPHRASE", value_name = "PASSPHRASE", hide_env_values = true)]
    pub gpg_passphrase: Option<String>,

    /// The two checksum algorithms written next to every file
    #[arg(
        long,
        value_name = "ALGORITHM",
        value_delimiter = ',',
        default_values = ["MD5", "SHA-1"]
    )]
    pub checksums: Vec<String>,

    /// Deployment name for the uploader (default: first project's coordinates)
    #[arg(long, value_name = "NAME")]
    pub deployment_name: Option<String>,

    /// Publish automatically once validation passes
    #[arg(long)]
    pub auto_publish: bool,

    /// Deployment state the uploader waits for
    #[arg(long, value_enum, value_name = "STAGE", default_value_t = WaitUntil::Validated)]
    pub wait_until: WaitUntil,

    /// Skip the whole run
    #[arg(long)]
    pub skip: bool,

    /// Print the deployment request as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.projects.iter().all(|p| p.trim().is_empty()) {
            return Err("no projects specified (use --project)".to_string());
        }

        if self.checksums.len() != 2 {
            return Err(format!(
                "exactly two checksum algorithms are required, got {}",
                self.checksums.len()
            ));
        }

        if self.gpg_executable.trim().is_empty() && !self.skip_sign {
            return Err("--gpg-executable cannot be empty".to_string());
        }

        Ok(())
    }

    /// Where the bundle is written.
    pub fn bundle_path(&self) -> PathBuf {
        bundle_path_in(&self.output)
    }

    /// Translates the arguments into validated bundler settings.
    pub fn to_settings(&self) -> crate::bundler::Result<Settings> {
        let signing = if self.skip_sign {
            SigningSettings::disabled()
        } else {
            SigningSettings {
                enabled: true,
                executable: self.gpg_executable.clone(),
                passphrase: self.gpg_passphrase.clone(),
            }
        };

        let publishing_type = if self.auto_publish {
            PublishingType::Automatic
        } else {
            PublishingType::UserManaged
        };

        let mut builder = SettingsBuilder::new()
            .projects_dir(&self.projects_dir)
            .projects(self.projects.iter().map(|p| p.trim().to_string()))
            .bundle_path(self.bundle_path())
            .include(IncludeOptions {
                binary: self.include_jar,
                sources: self.include_sources,
                docs: self.include_javadoc,
            })
            .signing(signing)
            .publishing_type(publishing_type)
            .wait_until(self.wait_until);

        if let [first, second] = self.checksums.as_slice() {
            builder = builder.checksums(first.as_str(), second.as_str());
        }
        if let Some(name) = &self.deployment_name {
            builder = builder.deployment_name(name.as_str());
        }

        builder.build()
    }
}

fn bundle_path_in(output: &Path) -> PathBuf {
    output.join("central-publishing").join("central-bundle.zip")
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
    json: bool,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        // stdout carries the JSON document, so human output goes quiet with it
        let output = super::OutputManager::new(!args.quiet && !args.json, args.quiet || args.json);

        Self {
            output,
            json: args.json,
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Whether the deployment request goes to stdout as JSON.
    pub fn json(&self) -> bool {
        self.json
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
