//! User-facing terminal output.
//!
//! Progress goes to stderr so stdout stays free for machine-readable output.

use std::io::{self, Write};

/// Verbose/quiet aware printer for CLI progress.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Only printed in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose && !self.quiet {
            writeln!(io::stderr().lock(), "  {message}")?;
        }
        Ok(())
    }

    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.print(&format!("→ {message}"))
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        self.print(&format!("✓ {message}"))
    }

    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.print(&format!("⚠ {message}"))
    }

    /// Errors are printed even in quiet mode.
    pub fn error(&self, message: &str) -> io::Result<()> {
        writeln!(io::stderr().lock(), "✗ {message}")
    }

    pub fn section(&self, title: &str) -> io::Result<()> {
        self.print(&format!("\n{title}\n{}", "─".repeat(title.chars().count())))
    }

    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.print(&format!("    {message}"))
    }

    fn print(&self, line: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stderr().lock(), "{line}")
    }
}
