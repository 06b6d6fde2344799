//! Maven Central deployment bundler for descriptor-only projects
//!
//! This library provides the core bundling functionality:
//! - resolving `groupId:artifactId:version` from a project descriptor
//! - detached OpenPGP signatures and MD5/SHA-1 checksums for every file
//! - one zip bundle laid out in repository convention
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
