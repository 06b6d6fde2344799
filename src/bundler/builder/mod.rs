//! Bundle orchestration and per-file processing.
//!
//! This module provides the main [`Bundler`] orchestrator that drives a batch of
//! projects into one deployment bundle.
//!
//! # Overview
//!
//! For each project the bundler:
//! 1. Resolves coordinates from the project descriptor
//! 2. Collects candidate artifact files
//! 3. Appends each present file with its two checksums
//! 4. Signs it and appends the signature with its own two checksums
//! 5. Deletes every signature file it produced
//!
//! # Module Organization
//!
//! - [`checksum`] - Streaming digests rendered as lowercase hex
//! - [`orchestrator`] - Main [`Bundler`] struct and batch reports
//! - [`processor`] - [`FileProcessor`] seam combining signing and checksums
//! - [`signing`] - Detached signatures through the external OpenPGP tool
//! - [`tool_detection`] - Signing tool availability checking

mod checksum;
mod orchestrator;
mod processor;
mod signing;
mod tool_detection;

pub use checksum::{ChecksumAlgorithm, calculate_checksum};
pub use orchestrator::{BatchReport, BundleEntry, Bundler, ProjectReport};
pub use processor::{DefaultFileProcessor, FileProcessor};
pub use signing::{SIGNATURE_EXTENSION, signature_path};
pub use tool_detection::resolve_signing_tool;
