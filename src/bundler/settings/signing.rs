//! Detached signature configuration.

use std::fmt;

/// Configuration of the external signing tool.
#[derive(Clone)]
pub struct SigningSettings {
    /// Whether files are signed at all.
    ///
    /// Default: `true`
    pub enabled: bool,

    /// Signing executable, resolved through `PATH` when not absolute.
    ///
    /// Default: `gpg`
    pub executable: String,

    /// Key passphrase. When set, the tool runs in batch mode and reads it from stdin.
    pub passphrase: Option<String>,
}

impl Default for SigningSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            executable: "gpg".into(),
            passphrase: None,
        }
    }
}

impl SigningSettings {
    /// Signing turned off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl fmt::Debug for SigningSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSettings")
            .field("enabled", &self.enabled)
            .field("executable", &self.executable)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
