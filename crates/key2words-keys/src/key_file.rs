//! Writing a restored key pair to disk.
//!
//! Both files are first written to hidden temporary files in the target
//! directory with their final permissions. Only then are they renamed
//! into place, public key first. A failure at any step leaves no
//! temporary files and no private key behind.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use key2words_types::config::AppConfig;
use key2words_types::{Key2WordsError, Result};

use crate::restore::RestoredKey;

/// Paths of the files written by [`write_key_pair`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WrittenFiles {
    /// The private key file.
    pub private_key: PathBuf,
    /// The `authorized_keys`-style public key file.
    pub public_key: PathBuf,
}

/// Writes the private and public halves of `key` as described by
/// `config`.
///
/// The private key is rendered in `config.private_key_format` and
/// written to `<output_dir>/<output_file>`; the public key goes next to
/// it with a `.pub` suffix. `output_dir` is created if missing.
///
/// # Errors
///
/// - [`Key2WordsError::Config`] if `config` fails validation.
/// - [`Key2WordsError::KeyWrite`] if either target exists and
///   `config.overwrite` is unset, or on any I/O failure. Nothing is
///   written when a target already exists.
pub fn write_key_pair(config: &AppConfig, key: &RestoredKey) -> Result<WrittenFiles> {
    config.validate()?;

    let private_path = config.private_key_path();
    let public_path = config.public_key_path();

    if !config.overwrite {
        for path in [&private_path, &public_path] {
            if path.exists() {
                return Err(Key2WordsError::KeyWrite {
                    reason: format!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    ),
                });
            }
        }
    }

    fs::create_dir_all(&config.output_dir).map_err(|e| Key2WordsError::KeyWrite {
        reason: format!("cannot create {}: {e}", config.output_dir.display()),
    })?;

    let private_key = key.private_key(config.private_key_format)?;
    let public_key = key.authorized_key()?;
    let private = StagedFile::write(
        &private_path,
        private_key.as_bytes(),
        config.private_key_mode,
    )?;
    let public = StagedFile::write(&public_path, public_key.as_bytes(), config.public_key_mode)?;

    public.commit()?;
    if let Err(e) = private.commit() {
        let _ = fs::remove_file(&public_path);
        return Err(e);
    }
    tracing::info!(
        private = %private_path.display(),
        public = %public_path.display(),
        "key pair written"
    );

    Ok(WrittenFiles {
        private_key: private_path,
        public_key: public_path,
    })
}

/// A file written next to its target, renamed into place by
/// [`StagedFile::commit`]. Dropping it uncommitted removes the temporary.
struct StagedFile {
    tmp: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedFile {
    fn write(target: &Path, contents: &[u8], mode: u32) -> Result<Self> {
        let staged = Self {
            tmp: temp_path(target),
            target: target.to_path_buf(),
            committed: false,
        };
        write_temp(&staged.tmp, contents, mode)?;
        Ok(staged)
    }

    fn commit(mut self) -> Result<()> {
        fs::rename(&self.tmp, &self.target).map_err(|e| Key2WordsError::KeyWrite {
            reason: format!("failed to rename {}: {e}", self.tmp.display()),
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

fn write_temp(tmp_path: &Path, contents: &[u8], mode: u32) -> Result<()> {
    let write_error = |e: std::io::Error| Key2WordsError::KeyWrite {
        reason: format!("failed to write {}: {e}", tmp_path.display()),
    };

    let mut file = create_file(tmp_path, mode).map_err(write_error)?;
    set_mode(&file, mode).map_err(write_error)?;
    file.write_all(contents).map_err(write_error)?;
    file.sync_all().map_err(write_error)
}

/// `dir/.name.tmp` for `dir/name`.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(unix)]
fn create_file(path: &Path, mode: u32) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)
}

#[cfg(not(unix))]
fn create_file(path: &Path, _mode: u32) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Applies `mode` exactly; the mode given at creation is masked by umask.
#[cfg(unix)]
fn set_mode(file: &File, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &File, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_is_hidden_sibling() {
        assert_eq!(
            temp_path(Path::new("/keys/restored_key.pub")),
            PathBuf::from("/keys/.restored_key.pub.tmp")
        );
        assert_eq!(
            temp_path(Path::new("restored_key")),
            PathBuf::from(".restored_key.tmp")
        );
    }

    fn write_atomic(path: &Path, contents: &[u8], mode: u32) -> Result<()> {
        StagedFile::write(path, contents, mode)?.commit()
    }

    #[test]
    fn staged_file_replaces_contents() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Key2WordsError::KeyWrite {
            reason: e.to_string(),
        })?;
        let path = dir.path().join("file");

        write_atomic(&path, b"first", 0o600)?;
        write_atomic(&path, b"second", 0o600)?;

        assert_eq!(fs::read(&path).unwrap_or_default(), b"second");
        assert!(!temp_path(&path).exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn staged_file_sets_mode() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().map_err(|e| Key2WordsError::KeyWrite {
            reason: e.to_string(),
        })?;
        let path = dir.path().join("secret");
        write_atomic(&path, b"x", 0o600)?;

        let mode = fs::metadata(&path).map(|m| m.permissions().mode()).unwrap_or(0);
        assert_eq!(mode & 0o777, 0o600);
        Ok(())
    }

    #[test]
    fn dropped_staged_file_leaves_nothing() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Key2WordsError::KeyWrite {
            reason: e.to_string(),
        })?;
        let path = dir.path().join("file");

        let staged = StagedFile::write(&path, b"x", 0o600)?;
        assert!(temp_path(&path).exists());
        drop(staged);

        assert!(!temp_path(&path).exists());
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let result = write_atomic(Path::new("/nonexistent/key2words/file"), b"x", 0o600);
        assert!(matches!(result, Err(Key2WordsError::KeyWrite { .. })));
    }
}
