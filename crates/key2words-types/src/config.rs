//! Restore configuration with sensible defaults.
//!
//! Controls where and how a restored key pair is written. Values come
//! from [`AppConfig::default`], optionally overlaid by a JSON file via
//! [`AppConfig::load`], and finally by command-line flags.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Key2WordsError, Result};

/// Default file name of a restored private key.
pub const DEFAULT_OUTPUT_FILE: &str = "restored_key";

/// On-disk format of a restored private key.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyFormat {
    /// PEM block labelled `PRIVATE KEY` holding the raw 64-byte
    /// `seed || public_key` pair.
    #[default]
    Pem,
    /// Unencrypted `OPENSSH PRIVATE KEY`, loadable by `ssh`.
    Openssh,
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pem => f.write_str("pem"),
            Self::Openssh => f.write_str("openssh"),
        }
    }
}

impl FromStr for KeyFormat {
    type Err = Key2WordsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pem" => Ok(Self::Pem),
            "openssh" => Ok(Self::Openssh),
            other => Err(Key2WordsError::Config {
                reason: format!("unknown key format '{other}' (expected pem or openssh)"),
            }),
        }
    }
}

/// Restore configuration.
///
/// Missing fields in a config file fall back to their defaults.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the key pair is written into.
    pub output_dir: PathBuf,

    /// File name of the private key. The public key gets a `.pub` suffix.
    pub output_file: String,

    /// Unix permission bits for the private key file.
    pub private_key_mode: u32,

    /// Unix permission bits for the public key file.
    pub public_key_mode: u32,

    /// Format of the private key file.
    pub private_key_format: KeyFormat,

    /// Replace existing files instead of refusing.
    pub overwrite: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            private_key_mode: 0o600,
            public_key_mode: 0o644,
            private_key_format: KeyFormat::Pem,
            overwrite: false,
        }
    }
}

impl AppConfig {
    /// Loads a JSON config file. Absent fields take their defaults.
    ///
    /// The result is validated before it is returned.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| Key2WordsError::Config {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;

        let config: Self = serde_json::from_str(&json).map_err(|e| Key2WordsError::Config {
            reason: format!("failed to parse {}: {e}", path.display()),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.output_file.trim().is_empty() {
            return Err(Key2WordsError::Config {
                reason: "output_file must not be empty".into(),
            });
        }

        if self.output_file.contains(|c: char| c == '/' || c == '\\') {
            return Err(Key2WordsError::Config {
                reason: "output_file must be a file name, use output_dir for the directory"
                    .into(),
            });
        }

        if self.private_key_mode > 0o777 || self.public_key_mode > 0o777 {
            return Err(Key2WordsError::Config {
                reason: "file modes must be within 0o777".into(),
            });
        }

        if self.private_key_mode & 0o077 != 0 {
            return Err(Key2WordsError::Config {
                reason: format!(
                    "private_key_mode {:o} lets other users read the key",
                    self.private_key_mode
                ),
            });
        }

        Ok(())
    }

    /// Path of the private key file.
    pub fn private_key_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    /// Path of the public key file.
    pub fn public_key_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.pub", self.output_file))
    }
}
