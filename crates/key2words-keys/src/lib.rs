//! OpenSSH key backup and restore for key2words.
//!
//! - **Backup**: read an OpenSSH Ed25519 private key (optionally
//!   passphrase-protected) and encode its seed as 24 words
//! - **Restore**: rebuild the key pair from the words and render it as
//!   PEM, OpenSSH and `authorized_keys` text
//! - **Key files**: write a restored pair to disk with safe permissions

pub mod backup;
pub mod key_file;
pub mod restore;

pub use backup::{backup_from_openssh, backup_key_file, BackupOutcome};
pub use key_file::{write_key_pair, WrittenFiles};
pub use restore::{restore_key, RestoredKey};
