//! File system utilities for bundling.
//!
//! Idempotent removal and directory creation with error context.

use crate::bundler::error::{ErrorExt, Result};
use std::{io, path::Path};

/// Creates the parent directories of `path`, if it has any.
pub fn create_parent_dirs(path: &Path) -> Result<()> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => std::fs::create_dir_all(parent).fs_context("creating directory", parent),
        None => Ok(()),
    }
}

/// Removes a file, treating an already-missing file as success.
///
/// Returns whether a file was actually removed.
pub fn remove_file(path: &Path) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false), // Idempotent
        Err(e) => Err(e),
    }
}

/// Removes a scratch file, logging instead of failing.
///
/// `what` names the file in log lines ("signature file", "unfinished bundle").
pub fn discard_file(path: &Path, what: &str) {
    match remove_file(path) {
        Ok(true) => log::debug!("Removed {} {}", what, path.display()),
        Ok(false) => {}
        Err(e) => log::warn!("Failed to delete {} {}: {}", what, path.display(), e),
    }
}
