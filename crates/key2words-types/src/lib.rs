//! Core shared types for key2words.
//!
//! Every crate in the workspace reports failures through
//! [`Key2WordsError`] so the CLI has one error surface to render.

pub mod config;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Key2WordsError
// ---------------------------------------------------------------------------

/// Central error type for key2words.
///
/// An unknown word and a checksum mismatch are separate variants with
/// separate hints; one means a typo in a word, the other a wrong phrase.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Key2WordsError {
    /// The encoder was given entropy whose length is not in the BIP39 table.
    #[error("invalid entropy length: {len} bytes (expected 16, 20, 24, 28 or 32)")]
    InvalidEntropyLength {
        /// Length of the rejected entropy, in bytes.
        len: usize,
    },

    /// The phrase does not have 12, 15, 18, 21 or 24 words.
    #[error("invalid word count: {count} (expected 12, 15, 18, 21 or 24)")]
    InvalidWordCount {
        /// Number of words found in the phrase.
        count: usize,
    },

    /// A word in the phrase is not in the wordlist.
    #[error("unknown word #{position}: '{word}'")]
    UnknownWord {
        /// The offending token, verbatim.
        word: String,
        /// 1-based position of the token in the phrase.
        position: usize,
    },

    /// Every word is valid but the embedded checksum does not match.
    #[error("mnemonic checksum mismatch")]
    ChecksumMismatch,

    /// The wordlist resource is malformed.
    #[error("invalid wordlist: {reason}")]
    InvalidWordlist {
        /// What is wrong with the list.
        reason: String,
    },

    /// A word index outside `0..2048` was looked up.
    #[error("word index {index} out of range (0..2048)")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
    },

    /// A word lookup found nothing.
    #[error("word '{word}' not in wordlist")]
    WordNotFound {
        /// The word that was looked up.
        word: String,
    },

    /// A key file could not be read.
    #[error("failed to read key file: {reason}")]
    KeyRead {
        /// Human-readable description of the I/O failure.
        reason: String,
    },

    /// The key material is not a parseable OpenSSH private key.
    #[error("failed to parse private key: {reason}")]
    KeyParse {
        /// Human-readable description of the parse failure.
        reason: String,
    },

    /// The passphrase did not decrypt the private key.
    #[error("incorrect passphrase")]
    IncorrectPassphrase,

    /// The passphrase could not be read from the terminal.
    #[error("failed to read passphrase: {reason}")]
    PassphraseInput {
        /// Human-readable description of the failure.
        reason: String,
    },

    /// The private key is not an Ed25519 key.
    #[error("unsupported key type: {algorithm} (only ssh-ed25519 keys can be backed up)")]
    UnsupportedKeyType {
        /// SSH algorithm name of the rejected key.
        algorithm: String,
    },

    /// A decoded seed cannot be turned into a key.
    #[error("seed is {len} bytes, an ed25519 key needs 32 (use a 24-word phrase)")]
    InvalidSeedLength {
        /// Length of the decoded seed, in bytes.
        len: usize,
    },

    /// A restored key could not be written.
    #[error("failed to write key file: {reason}")]
    KeyWrite {
        /// Human-readable description of the write failure.
        reason: String,
    },

    /// A configuration value is invalid or the config file is unreadable.
    #[error("config error: {reason}")]
    Config {
        /// Human-readable description of the configuration problem.
        reason: String,
    },
}

impl Key2WordsError {
    /// Returns `true` if the error was caused by something the user
    /// typed, as opposed to a file or environment problem.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidWordCount { .. }
                | Self::UnknownWord { .. }
                | Self::ChecksumMismatch
                | Self::IncorrectPassphrase
        )
    }

    /// Returns a short suggestion for fixing a mistyped phrase, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownWord { .. } => {
                Some("check the spelling of that word against the BIP39 English wordlist")
            }
            Self::ChecksumMismatch => Some(
                "all words are valid but the phrase is not; check the word order \
                 and look for a word swapped with a similar one",
            ),
            Self::InvalidWordCount { .. } => Some("a backup phrase has 24 words"),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Result alias
// ---------------------------------------------------------------------------

/// Convenience result type using [`Key2WordsError`].
pub type Result<T> = std::result::Result<T, Key2WordsError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
