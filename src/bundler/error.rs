//! Error types for bundle assembly.
//!
//! Every fatal condition of a publishing run maps to one [`Error`] variant.
//! Recoverable conditions (missing optional files, cleanup failures) never
//! surface here; they are logged and recorded on the project report instead.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use super::collector::ArtifactKind;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving, collecting, signing, hashing or archiving artifacts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The project descriptor is not well-formed XML.
    #[error("Invalid project descriptor {path:?}: {reason}")]
    DescriptorInvalid {
        /// Descriptor that failed to parse
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// A coordinate is absent or empty after parent fallback.
    #[error("Missing or empty {field} in project descriptor {path:?}")]
    MissingCoordinate {
        /// One of `groupId`, `artifactId`, `version`
        field: &'static str,
        /// Descriptor that was resolved
        path: PathBuf,
    },

    /// A coordinate cannot be used as a repository path segment.
    #[error("Invalid {field} {value:?} in project descriptor {path:?}")]
    InvalidCoordinate {
        /// One of `groupId`, `artifactId`, `version`
        field: &'static str,
        /// Offending value
        value: String,
        /// Descriptor that was resolved
        path: PathBuf,
    },

    /// A mandatory artifact file does not exist on disk.
    #[error("Required {kind} file not found: {path:?}")]
    RequiredFileMissing {
        /// Kind of the missing file
        kind: ArtifactKind,
        /// Expected location
        path: PathBuf,
    },

    /// A checksum algorithm name that has no implementation.
    #[error("Unsupported checksum algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The configured signing executable could not be located.
    #[error("Signing tool '{tool}' not found: {source}")]
    SigningToolNotFound {
        /// Executable name or path as configured
        tool: String,
        /// Lookup failure
        source: which::Error,
    },

    /// The signing tool exited unsuccessfully.
    #[error("Signing {file:?} failed ({status}): {output}")]
    SigningFailed {
        /// File that was being signed
        file: PathBuf,
        /// Exit status description
        status: String,
        /// Merged stdout/stderr of the tool
        output: String,
    },

    /// Waiting on the signing tool was interrupted.
    #[error("Signing {file:?} was interrupted")]
    SigningInterrupted {
        /// File that was being signed
        file: PathBuf,
    },

    /// An entry path was appended to the bundle twice.
    #[error("Duplicate bundle entry: {0}")]
    DuplicateEntry(String),

    /// The batch input is unusable (no projects, missing project directory, ...).
    #[error("Invalid batch: {0}")]
    InvalidBatch(String),

    /// Filesystem operation failed on a known path.
    #[error("Failed {context} {path:?}: {error}")]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        error: io::Error,
    },

    /// Archive writer failure.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO errors without path context.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Whether this error stems from configuration rather than the projects being bundled.
    ///
    /// Configuration errors are reported before any bundling work starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedAlgorithm(_)
                | Error::InvalidBatch(_)
                | Error::SigningToolNotFound { .. }
        )
    }
}

/// Attaches filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps the error with what was being done and to which path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Converts options and foreign results into [`Error::GenericError`].
pub trait Context<T> {
    /// Attaches a message.
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T> Context<T> for Result<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

/// Returns early with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_context_keeps_path_and_kind() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.fs_context("reading", "/tmp/x").unwrap_err();
        match err {
            Error::Fs { context, path, error } => {
                assert_eq!(context, "reading");
                assert_eq!(path, PathBuf::from("/tmp/x"));
                assert_eq!(error.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn configuration_errors_are_classified() {
        assert!(Error::UnsupportedAlgorithm("CRC".into()).is_configuration());
        assert!(Error::InvalidBatch("empty".into()).is_configuration());
        assert!(!Error::DuplicateEntry("a/b".into()).is_configuration());
    }
}
