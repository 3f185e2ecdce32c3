//! Restore: mnemonic → Ed25519 key pair in the formats SSH tools read.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use key2words_crypto::mnemonic::mnemonic_to_seed;
use key2words_crypto::signing::{Keypair, PublicKey};
use key2words_types::config::KeyFormat;
use key2words_types::{Key2WordsError, Result};
use ssh_key::private::{Ed25519Keypair, KeypairData};
use ssh_key::public::{Ed25519PublicKey, KeyData};
use ssh_key::LineEnding;
use zeroize::Zeroizing;

/// PEM label for the raw `seed || public key` private key block.
pub const PEM_LABEL: &str = "PRIVATE KEY";

const PEM_LINE_WIDTH: usize = 64;

/// A key pair rebuilt from a mnemonic.
pub struct RestoredKey {
    keypair: Keypair,
}

/// Decodes `phrase` and rebuilds the Ed25519 key pair it encodes.
///
/// # Errors
///
/// - Any decoding error from [`mnemonic_to_seed`].
/// - [`Key2WordsError::InvalidSeedLength`] if the phrase is valid but
///   does not hold a 32-byte seed (anything but 24 words).
pub fn restore_key(phrase: &str) -> Result<RestoredKey> {
    let entropy = mnemonic_to_seed(phrase)?;
    let seed = entropy
        .as_seed32()
        .ok_or(Key2WordsError::InvalidSeedLength { len: entropy.len() })?;
    Ok(RestoredKey {
        keypair: Keypair::from_seed(seed),
    })
}

impl RestoredKey {
    /// Returns the public key.
    pub fn public_key(&self) -> PublicKey {
        self.keypair.public_key()
    }

    /// Renders the private key as a `PRIVATE KEY` PEM block.
    ///
    /// The body is the 64-byte `seed || public key`, base64 encoded and
    /// wrapped at 64 columns, with LF line endings and a final newline.
    pub fn private_key_pem(&self) -> Zeroizing<String> {
        let der = Zeroizing::new(self.keypair.to_keypair_bytes());
        let body = Zeroizing::new(STANDARD.encode(der.as_slice()));

        let mut pem = Zeroizing::new(String::with_capacity(body.len() + 64));
        pem.push_str("-----BEGIN ");
        pem.push_str(PEM_LABEL);
        pem.push_str("-----\n");
        // Base64 output is ASCII, so byte chunks are valid UTF-8.
        for line in body.as_bytes().chunks(PEM_LINE_WIDTH) {
            pem.push_str(std::str::from_utf8(line).unwrap_or_default());
            pem.push('\n');
        }
        pem.push_str("-----END ");
        pem.push_str(PEM_LABEL);
        pem.push_str("-----\n");
        pem
    }

    /// Renders the private key in the unencrypted OpenSSH format.
    ///
    /// # Errors
    ///
    /// Returns [`Key2WordsError::KeyWrite`] if encoding fails.
    pub fn private_key_openssh(&self) -> Result<Zeroizing<String>> {
        let seed = Zeroizing::new(self.keypair.seed_bytes());
        let key_data = KeypairData::Ed25519(Ed25519Keypair::from_seed(&seed));
        let key = ssh_key::PrivateKey::new(key_data, "").map_err(encode_error)?;
        key.to_openssh(LineEnding::LF).map_err(encode_error)
    }

    /// Renders the private key in `format`.
    pub fn private_key(&self, format: KeyFormat) -> Result<Zeroizing<String>> {
        match format {
            KeyFormat::Pem => Ok(self.private_key_pem()),
            KeyFormat::Openssh => self.private_key_openssh(),
        }
    }

    /// Renders the public key as an `authorized_keys` line:
    /// `ssh-ed25519 <base64>` and a newline, with no comment.
    ///
    /// # Errors
    ///
    /// Returns [`Key2WordsError::KeyWrite`] if encoding fails.
    pub fn authorized_key(&self) -> Result<String> {
        let public = Ed25519PublicKey(*self.keypair.public_key().as_bytes());
        let key = ssh_key::PublicKey::new(KeyData::Ed25519(public), "");
        let mut line = key.to_openssh().map_err(encode_error)?;
        line.push('\n');
        Ok(line)
    }
}

fn encode_error(e: ssh_key::Error) -> Key2WordsError {
    Key2WordsError::KeyWrite {
        reason: format!("key encoding failed: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
