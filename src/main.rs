//! Kodegen Bundler Maven - Maven Central deployment bundler for descriptor-only projects.
//!
//! This binary signs, checksums and packs project descriptors into a single
//! deployment archive ready for the Central Portal uploader.

use kodegen_bundler_maven::cli;
use std::process;

fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run() {
        Ok(code) => code,
        Err(e) => {
            cli::report_error(&e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
