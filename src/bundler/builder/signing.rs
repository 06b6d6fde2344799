//! Detached signatures through an external OpenPGP tool.
//!
//! The tool is invoked as a blocking subprocess and waited on without timeout.
//! Its exit status is the only success signal; stdout and stderr are captured
//! together for logging and error reporting.

use crate::bundler::{
    Error,
    error::{ErrorExt, Result},
    settings::SigningSettings,
};
use std::{
    ffi::OsString,
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

/// Extension of armored detached signatures.
pub const SIGNATURE_EXTENSION: &str = "asc";

/// Path of the signature produced for `file`: `<file>.asc`.
pub fn signature_path(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_os_string();
    name.push(".");
    name.push(SIGNATURE_EXTENSION);
    PathBuf::from(name)
}

/// Builds the argument list for a detached, armored signature of `file` into `output`.
///
/// With a passphrase the tool runs non-interactively and reads the passphrase
/// from stdin, so it never appears on the command line.
pub fn signing_args(file: &Path, output: &Path, with_passphrase: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--detach-sign".into(),
        "--armor".into(),
        "--yes".into(),
        "--output".into(),
        output.as_os_str().to_os_string(),
    ];

    if with_passphrase {
        args.extend(
            ["--batch", "--pinentry-mode", "loopback", "--passphrase-fd", "0"]
                .into_iter()
                .map(OsString::from),
        );
    }

    args.push(file.as_os_str().to_os_string());
    args
}

/// Signs `file`, writing `<file>.asc`.
///
/// # Errors
///
/// - [`Error::SigningFailed`] when the tool exits non-zero
/// - [`Error::SigningInterrupted`] when waiting on the tool is interrupted
/// - [`Error::Fs`] when the tool cannot be spawned
pub fn sign_file(settings: &SigningSettings, file: &Path) -> Result<PathBuf> {
    let signature = signature_path(file);
    let passphrase = settings.passphrase.as_deref().filter(|p| !p.is_empty());

    log::info!("Signing file: {}", file.display());

    let mut child = Command::new(&settings.executable)
        .args(signing_args(file, &signature, passphrase.is_some()))
        .stdin(if passphrase.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .fs_context("spawning signing tool for", file)?;

    if let (Some(passphrase), Some(mut stdin)) = (passphrase, child.stdin.take()) {
        // A tool that exits before reading stdin closes the pipe; its exit status tells the story.
        if let Err(e) = writeln!(stdin, "{passphrase}") {
            if e.kind() != io::ErrorKind::BrokenPipe {
                return Err(Error::Fs {
                    context: "passing passphrase to signing tool for",
                    path: file.to_path_buf(),
                    error: e,
                });
            }
        }
    }

    let output = child.wait_with_output().map_err(|e| match e.kind() {
        io::ErrorKind::Interrupted => Error::SigningInterrupted {
            file: file.to_path_buf(),
        },
        _ => Error::Fs {
            context: "waiting for signing tool on",
            path: file.to_path_buf(),
            error: e,
        },
    })?;

    let merged = merged_output(&output);
    if !merged.is_empty() {
        log::debug!("{}: {}", settings.executable, merged);
    }

    if !output.status.success() {
        return Err(Error::SigningFailed {
            file: file.to_path_buf(),
            status: output.status.to_string(),
            output: merged,
        });
    }

    log::info!("Successfully signed: {}", file.display());
    Ok(signature)
}

/// Tool output for logs and errors: stdout, then stderr, trimmed.
///
/// The streams are captured on separate pipes, so lines are grouped per
/// stream rather than interleaved in the order the tool wrote them.
fn merged_output(output: &Output) -> String {
    let mut merged = String::from_utf8_lossy(&output.stdout).into_owned();
    merged.push_str(&String::from_utf8_lossy(&output.stderr));
    merged.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn merged_output_puts_stderr_after_stdout() {
        use std::os::unix::process::ExitStatusExt;

        let output = Output {
            status: std::process::ExitStatus::from_raw(0),
            stdout: b"using key ABCD\n".to_vec(),
            stderr: b"gpg: signing failed\n".to_vec(),
        };
        assert_eq!(
            merged_output(&output),
            "using key ABCD\ngpg: signing failed"
        );
    }

    #[test]
    fn signature_sits_next_to_file() {
        assert_eq!(
            signature_path(Path::new("/p/core-1.0.jar")),
            PathBuf::from("/p/core-1.0.jar.asc")
        );
    }

    #[test]
    fn args_without_passphrase() {
        let args = signing_args(Path::new("a.pom"), Path::new("a.pom.asc"), false);
        assert_eq!(
            args,
            ["--detach-sign", "--armor", "--yes", "--output", "a.pom.asc", "a.pom"]
                .map(OsString::from)
        );
    }

    #[test]
    fn passphrase_switches_to_batch_mode() {
        let args = signing_args(Path::new("a.pom"), Path::new("a.pom.asc"), true);
        assert!(args.contains(&OsString::from("--batch")));
        assert!(args.contains(&OsString::from("--passphrase-fd")));
        assert_eq!(args.last(), Some(&OsString::from("a.pom")));
    }
}
