//! Command line interface for kodegen maven bundler.
//!
//! This module provides the CLI for bundle creation, with argument parsing,
//! batch execution, and user feedback.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::{
    bundler::{BatchReport, Bundler},
    error::{BundlerError, CliError, Result},
};
use anyhow::Context;
use std::io::Write;

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args)
}

/// Runs one batch for already-parsed arguments.
///
/// Returns the process exit code on success.
pub fn execute(args: &Args) -> Result<i32> {
    let config = RuntimeConfig::from(args);

    if args.skip {
        log::info!("Skipping bundle creation (--skip)");
        config.progress("Skipping bundle creation")?;
        return Ok(0);
    }

    if !args.projects_dir.exists() {
        log::debug!(
            "Projects directory {} does not exist, nothing to bundle",
            args.projects_dir.display()
        );
        return Ok(0);
    }

    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;
    let settings = args.to_settings()?;

    config.section(&format!(
        "Bundling {} project(s) from {}",
        settings.projects().len(),
        settings.projects_dir().display()
    ))?;

    let bundler = Bundler::new(settings)?;
    let report = bundler.bundle()?;
    print_report(&config, &report)?;

    let request = report.deployment_request(bundler.settings());
    if config.json() {
        let json = serde_json::to_string_pretty(&request)?;
        writeln!(std::io::stdout().lock(), "{json}")
            .context("writing deployment request to stdout")?;
    } else {
        config.success(&format!(
            "Bundle ready: {} ({} entries)",
            request.bundle_path.display(),
            report.entry_count()
        ))?;
        config.indent(&format!("deployment name: {}", request.deployment_name))?;
    }

    Ok(0)
}

fn print_report(config: &RuntimeConfig, report: &BatchReport) -> std::io::Result<()> {
    for project in &report.projects {
        config.progress(&format!(
            "{} ({} entries)",
            project.coordinates,
            project.entries.len()
        ))?;
        for entry in &project.entries {
            config.output().verbose(&entry.path)?;
        }
    }
    for warning in report.warnings() {
        config.warn(warning)?;
    }
    Ok(())
}

/// Prints an error with its recovery suggestions.
pub fn report_error(error: &BundlerError) {
    let output = OutputManager::new(false, false);
    let label = if error.is_configuration() {
        "Configuration error"
    } else {
        "Error"
    };

    // stderr may be gone; nothing left to report to
    let _ = output.error(&format!("{label}: {error}"));
    for suggestion in error.recovery_suggestions() {
        let _ = output.indent(&suggestion);
    }
}
