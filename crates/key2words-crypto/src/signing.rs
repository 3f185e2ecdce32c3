//! Ed25519 key regeneration from a 32-byte seed.
//!
//! An Ed25519 private key is fully determined by its seed, so a seed
//! recovered from a mnemonic is all that is needed to rebuild the key
//! pair. The private key is zeroized on drop via `ed25519-dalek`'s
//! `ZeroizeOnDrop`.

use ed25519_dalek::SigningKey;

use key2words_types::{Key2WordsError, Result};

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// Ed25519 public key (32 bytes).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Fixed byte length of an Ed25519 public key.
    pub const LEN: usize = 32;

    /// Creates a [`PublicKey`] from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte array.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Keypair
// ---------------------------------------------------------------------------

/// Ed25519 key pair rebuilt from a seed.
///
/// Not `Clone` or `Debug`.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Length of an Ed25519 seed in bytes.
    pub const SEED_LEN: usize = 32;

    /// Reconstructs a key pair deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Like [`Keypair::from_seed`], for a seed of unchecked length.
    ///
    /// # Errors
    ///
    /// Returns [`Key2WordsError::InvalidSeedLength`] unless `seed` is
    /// exactly 32 bytes.
    pub fn from_seed_slice(seed: &[u8]) -> Result<Self> {
        let seed = <&[u8; 32]>::try_from(seed)
            .map_err(|_| Key2WordsError::InvalidSeedLength { len: seed.len() })?;
        Ok(Self::from_seed(seed))
    }

    /// Returns the public half of this key pair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Returns the 32-byte seed.
    ///
    /// The copy is secret key material; wrap it in `Zeroizing` or drop
    /// it promptly.
    pub fn seed_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Returns `seed || public key`, the 64-byte form written to
    /// `PRIVATE KEY` PEM files and OpenSSH key blobs.
    pub fn to_keypair_bytes(&self) -> [u8; 64] {
        self.signing_key.to_keypair_bytes()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
