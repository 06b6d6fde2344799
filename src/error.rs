//! Application error types.
//!
//! This module defines the errors surfaced by the CLI with actionable messages
//! and recovery suggestions.

use crate::bundler;
use thiserror::Error;

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all application operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use bundler::Error as B;

        match self {
            BundlerError::Bundler(B::SigningToolNotFound { tool, .. }) => vec![
                format!("Install '{tool}' or pass --gpg-executable with its full path"),
                "Pass --skip-sign to build an unsigned bundle".to_string(),
            ],
            BundlerError::Bundler(B::SigningFailed { .. } | B::SigningInterrupted { .. }) => vec![
                "Check that the signing key is available (gpg --list-secret-keys)".to_string(),
                "Provide the key passphrase with --gpg-passphrase or GPG_PASSPHRASE".to_string(),
            ],
            BundlerError::Bundler(B::DescriptorInvalid { .. } | B::MissingCoordinate { .. }) => {
                vec![
                    "Ensure pom.xml is well-formed and declares groupId, artifactId and version"
                        .to_string(),
                    "groupId and version may be inherited from a <parent> block".to_string(),
                ]
            }
            BundlerError::Bundler(B::InvalidCoordinate { .. }) => vec![
                "Coordinates become repository paths: no '/', '\\', '.' or '..' segments"
                    .to_string(),
            ],
            BundlerError::Bundler(B::RequiredFileMissing { .. }) => vec![
                "Each project directory must contain its descriptor (pom.xml)".to_string(),
            ],
            BundlerError::Bundler(B::DuplicateEntry(_)) => vec![
                "Two projects resolve to the same coordinates; remove one from --project"
                    .to_string(),
            ],
            BundlerError::Bundler(B::UnsupportedAlgorithm(_)) => vec![
                "Supported checksum algorithms: MD5, SHA-1, SHA-256, SHA-512".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Whether the error comes from configuration rather than the projects.
    pub fn is_configuration(&self) -> bool {
        match self {
            BundlerError::Cli(_) => true,
            BundlerError::Bundler(e) => e.is_configuration(),
            _ => false,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_configuration() { 2 } else { 1 }
    }
}
