//! Hand-off to the external uploader.
//!
//! The uploader needs exactly three things from a run: the sealed bundle, a
//! human-readable deployment name and the publishing mode. [`DeploymentRequest`]
//! packages them (plus the stage the uploader should wait for) in a
//! serializable form.

use serde::Serialize;
use std::path::PathBuf;

/// How the remote service publishes a validated deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublishingType {
    /// Published as soon as validation passes.
    Automatic,
    /// Held for manual review.
    #[default]
    UserManaged,
}

/// Deployment state the uploader waits for before returning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaitUntil {
    Uploaded,
    #[default]
    Validated,
    /// Only meaningful with [`PublishingType::Automatic`].
    Published,
}

/// Everything the uploader receives for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRequest {
    pub deployment_name: String,
    pub bundle_path: PathBuf,
    pub publishing_type: PublishingType,
    pub wait_until: WaitUntil,
}
