//! `key2words backup <private_key_file>`.

use std::path::{Path, PathBuf};

use clap::Args;
use key2words_crypto::Mnemonic;
use key2words_keys::backup::{backup_key_file, BackupOutcome};
use key2words_types::{Key2WordsError, Result};

use crate::output;
use crate::prompt::{self, MAX_ATTEMPTS, PASSPHRASE_ENV};
use crate::GlobalOpts;

#[derive(Args)]
pub struct BackupArgs {
    /// OpenSSH Ed25519 private key file.
    pub private_key_file: PathBuf,
}

pub fn run(args: BackupArgs, opts: &GlobalOpts) -> Result<()> {
    let path = args.private_key_file.as_path();
    let mnemonic = match backup_key_file(path, None)? {
        BackupOutcome::Mnemonic(m) => m,
        BackupOutcome::NeedsPassphrase => unlock(path)?,
    };

    if opts.json {
        output::print_json(&serde_json::json!({
            "status": "ok",
            "words": mnemonic.word_count(),
            "mnemonic": mnemonic.as_str(),
        }));
    } else {
        output::print_success("Private key successfully backed up!");
        output::print_kv("Mnemonic", mnemonic.as_str());
    }
    Ok(())
}

/// Gets a passphrase and retries. A passphrase from the environment is
/// tried once; an interactive one up to [`MAX_ATTEMPTS`] times.
fn unlock(path: &Path) -> Result<Mnemonic> {
    if let Some(passphrase) = prompt::passphrase_from_env() {
        tracing::debug!("using passphrase from {PASSPHRASE_ENV}");
        return match backup_key_file(path, Some(passphrase.as_bytes()))? {
            BackupOutcome::Mnemonic(m) => Ok(m),
            BackupOutcome::NeedsPassphrase => Err(Key2WordsError::IncorrectPassphrase),
        };
    }

    for attempt in 1..=MAX_ATTEMPTS {
        let passphrase = prompt::read_passphrase(path)?;
        match backup_key_file(path, Some(passphrase.as_bytes())) {
            Ok(BackupOutcome::Mnemonic(m)) => return Ok(m),
            Ok(BackupOutcome::NeedsPassphrase) | Err(Key2WordsError::IncorrectPassphrase) => {
                tracing::warn!(attempt, "incorrect passphrase");
            }
            Err(e) => return Err(e),
        }
    }
    Err(Key2WordsError::IncorrectPassphrase)
}
