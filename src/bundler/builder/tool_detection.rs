//! External tool detection and availability checking.
//!
//! The signing executable is resolved once, before the bundle is opened, so a
//! missing tool is reported as a configuration error instead of failing halfway
//! through a batch.

use crate::bundler::{Error, error::Result};
use std::path::PathBuf;

/// Resolves the signing executable through `PATH` (or as given, when it is a path).
///
/// Logs the tool's version line at `info` when it answers `--version`.
///
/// # Errors
///
/// [`Error::SigningToolNotFound`] when the executable cannot be located.
pub fn resolve_signing_tool(executable: &str) -> Result<PathBuf> {
    let path = which::which(executable).map_err(|source| Error::SigningToolNotFound {
        tool: executable.to_string(),
        source,
    })?;
    log::debug!("Found {} at: {}", executable, path.display());

    match std::process::Command::new(&path).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or_default();
            log::info!("✓ signing tool available: {}", first_line.trim());
        }
        Ok(output) => {
            log::warn!(
                "{} found at {} but --version check failed (exit code: {:?})",
                executable,
                path.display(),
                output.status.code()
            );
        }
        Err(e) => {
            log::warn!(
                "{} found at {} but failed to execute: {}. Check file permissions.",
                executable,
                path.display(),
                e
            );
        }
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tool_is_configuration_error() {
        let err = resolve_signing_tool("kodegen-no-such-signing-tool-4f1c").unwrap_err();
        assert!(matches!(err, Error::SigningToolNotFound { .. }));
        assert!(err.is_configuration());
    }
}
