//! Per-file processing: detached signatures and checksums.

use super::{
    checksum::{ChecksumAlgorithm, calculate_checksum},
    signing::sign_file,
    tool_detection::resolve_signing_tool,
};
use crate::bundler::{error::Result, settings::SigningSettings};
use std::path::{Path, PathBuf};

/// Produces the derived files of a bundle entry.
pub trait FileProcessor {
    /// Signs `file`, returning the signature path, or `None` when signing is disabled.
    ///
    /// The caller owns the returned file and must delete it.
    fn sign(&self, file: &Path) -> Result<Option<PathBuf>>;

    /// Lowercase hex digest of `file`.
    fn checksum(&self, file: &Path, algorithm: ChecksumAlgorithm) -> Result<String>;

    /// Whether [`sign`](Self::sign) produces signatures.
    fn signing_enabled(&self) -> bool;
}

/// Streaming checksums plus signatures through the configured OpenPGP tool.
#[derive(Debug, Clone)]
pub struct DefaultFileProcessor {
    signing: SigningSettings,
}

impl DefaultFileProcessor {
    pub fn new(signing: SigningSettings) -> Self {
        Self { signing }
    }

    /// Pins the signing executable to its resolved location.
    ///
    /// No-op when signing is disabled.
    ///
    /// # Errors
    ///
    /// [`crate::bundler::Error::SigningToolNotFound`] when the tool is not installed.
    pub fn with_resolved_tool(mut self) -> Result<Self> {
        if self.signing.enabled {
            let path = resolve_signing_tool(&self.signing.executable)?;
            self.signing.executable = path.to_string_lossy().into_owned();
        }
        Ok(self)
    }
}

impl FileProcessor for DefaultFileProcessor {
    fn sign(&self, file: &Path) -> Result<Option<PathBuf>> {
        if !self.signing.enabled {
            return Ok(None);
        }
        sign_file(&self.signing, file).map(Some)
    }

    fn checksum(&self, file: &Path, algorithm: ChecksumAlgorithm) -> Result<String> {
        calculate_checksum(file, algorithm)
    }

    fn signing_enabled(&self) -> bool {
        self.signing.enabled
    }
}
