//! BIP39 mnemonic encoding and decoding of raw seeds.
//!
//! Entropy of 16, 20, 24, 28 or 32 bytes is turned into 12 to 24 words
//! and back:
//!
//! 1. **Encode**: `SHA-256(entropy)` → take the first `entropy_bits / 32`
//!    bits as checksum → `entropy || checksum` is a multiple of 11 bits →
//!    each 11-bit group indexes the wordlist → words joined by one space.
//! 2. **Decode**: words → 11-bit indices → `entropy || checksum` →
//!    recompute the checksum from the recovered entropy and compare.
//!
//! No PBKDF2 stretching is applied: the words *are* the seed.
//!
//! Reference: <https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki>

use std::fmt;
use std::str::FromStr;

use key2words_types::{Key2WordsError, Result};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::bits::BitWriter;
use crate::hash::checksum;
use crate::wordlist::{english, Wordlist, BITS_PER_WORD};

/// Entropy lengths accepted by the encoder, in bytes.
pub const ENTROPY_LENGTHS: [usize; 5] = [16, 20, 24, 28, 32];

/// Word counts accepted by the decoder, matching [`ENTROPY_LENGTHS`].
pub const WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

// ---------------------------------------------------------------------------
// Mnemonic
// ---------------------------------------------------------------------------

/// A checksummed BIP39 phrase in canonical form: words separated by a
/// single ASCII space, no surrounding whitespace.
///
/// Zeroized on drop. `Debug` does not print the words.
#[derive(Eq, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic(String);

impl Mnemonic {
    /// Validates `phrase` and returns it in canonical form.
    ///
    /// Runs of whitespace between words, and around the phrase, are
    /// accepted. Casing is not normalized.
    pub fn parse(phrase: &str) -> Result<Self> {
        let entropy = mnemonic_to_seed(phrase)?;
        seed_to_mnemonic(entropy.as_bytes())
    }

    /// Returns the phrase as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the individual words.
    pub fn words(&self) -> Vec<&str> {
        self.0.split(' ').collect()
    }

    /// Returns the number of words.
    pub fn word_count(&self) -> usize {
        self.0.split(' ').count()
    }
}

impl FromStr for Mnemonic {
    type Err = Key2WordsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic(<{} words>)", self.word_count())
    }
}

// ---------------------------------------------------------------------------
// Entropy
// ---------------------------------------------------------------------------

/// Seed bytes recovered from a mnemonic.
///
/// Zeroized on drop. `Debug` does not print the bytes.
#[derive(Eq, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct Entropy(Vec<u8>);

impl Entropy {
    /// Returns the raw seed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for decoded entropy.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the bytes as a 32-byte seed, if that is their length.
    pub fn as_seed32(&self) -> Option<&[u8; 32]> {
        <&[u8; 32]>::try_from(self.0.as_slice()).ok()
    }
}

impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entropy(<{} bytes>)", self.0.len())
    }
}

// ---------------------------------------------------------------------------
// Encode / decode
// ---------------------------------------------------------------------------

/// Encodes a seed as a BIP39 English mnemonic.
///
/// Deterministic: the same entropy always yields the same phrase.
///
/// # Errors
///
/// - [`Key2WordsError::InvalidEntropyLength`] if `entropy` is not 16,
///   20, 24, 28 or 32 bytes.
/// - [`Key2WordsError::InvalidWordlist`] if the English list is unusable.
pub fn seed_to_mnemonic(entropy: &[u8]) -> Result<Mnemonic> {
    english()?.encode(entropy)
}

/// Decodes a BIP39 English mnemonic back into the seed it encodes.
///
/// # Errors
///
/// - [`Key2WordsError::InvalidWordCount`] unless there are 12, 15, 18,
///   21 or 24 words.
/// - [`Key2WordsError::UnknownWord`] for the first word not in the list.
/// - [`Key2WordsError::ChecksumMismatch`] if the words are valid but do
///   not form a valid phrase. No entropy is returned in that case.
pub fn mnemonic_to_seed(phrase: &str) -> Result<Entropy> {
    english()?.decode(phrase)
}

/// Checks that `phrase` is a valid BIP39 English mnemonic.
pub fn validate_mnemonic(phrase: &str) -> Result<()> {
    mnemonic_to_seed(phrase).map(drop)
}

impl Wordlist<'_> {
    /// Encodes `entropy` against this wordlist. See [`seed_to_mnemonic`].
    pub fn encode(&self, entropy: &[u8]) -> Result<Mnemonic> {
        if !ENTROPY_LENGTHS.contains(&entropy.len()) {
            return Err(Key2WordsError::InvalidEntropyLength { len: entropy.len() });
        }

        let entropy_bits = entropy.len() * 8;
        let checksum_bits = entropy_bits / 32;

        let mut stream = BitWriter::with_capacity(entropy_bits + checksum_bits);
        stream.write_bytes(entropy);
        stream.write_bits(checksum(entropy, checksum_bits), checksum_bits);

        let mut reader = stream.reader();
        let mut words = Vec::with_capacity(stream.bit_len() / BITS_PER_WORD);
        while let Some(index) = reader.read_bits(BITS_PER_WORD) {
            words.push(self.word_at(index as usize)?);
        }

        Ok(Mnemonic(words.join(" ")))
    }

    /// Decodes `phrase` against this wordlist. See [`mnemonic_to_seed`].
    pub fn decode(&self, phrase: &str) -> Result<Entropy> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let count = words.len();
        if !WORD_COUNTS.contains(&count) {
            return Err(Key2WordsError::InvalidWordCount { count });
        }

        let total_bits = count * BITS_PER_WORD;
        let checksum_bits = total_bits / 33;
        let entropy_bits = total_bits - checksum_bits;

        let mut stream = BitWriter::with_capacity(total_bits);
        for (i, word) in words.iter().enumerate() {
            let index = self
                .index_of(word)
                .map_err(|_| Key2WordsError::UnknownWord {
                    word: (*word).to_string(),
                    position: i + 1,
                })?;
            stream.write_bits(u32::from(index), BITS_PER_WORD);
        }

        // The writer holds exactly total_bits, so these reads cannot run short.
        let short = || Key2WordsError::InvalidWordCount { count };
        let mut reader = stream.reader();
        let mut entropy = Zeroizing::new(Vec::with_capacity(entropy_bits / 8));
        for _ in 0..entropy_bits / 8 {
            entropy.push(reader.read_bits(8).ok_or_else(short)? as u8);
        }
        let embedded = reader.read_bits(checksum_bits).ok_or_else(short)?;

        if embedded != checksum(&entropy, checksum_bits) {
            return Err(Key2WordsError::ChecksumMismatch);
        }

        Ok(Entropy(std::mem::take(&mut *entropy)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_SEED: &str = "076be8733da9c93bf11fec6d37a4b2ee6f628d621faccea798ff57bb0038ddcb";
    const KNOWN_PHRASE: &str = "alter gap broom kitten orient over settle work honey rule \
                                coach system wage effort mask void solid devote divert \
                                quarter quote broccoli jaguar lady";

    fn known_seed() -> Vec<u8> {
        hex::decode(KNOWN_SEED).unwrap_or_default()
    }

    #[test]
    fn known_seed_encodes_to_known_phrase() -> Result<()> {
        let mnemonic = seed_to_mnemonic(&known_seed())?;
        assert_eq!(mnemonic.as_str(), KNOWN_PHRASE);
        assert_eq!(mnemonic.word_count(), 24);
        Ok(())
    }

    #[test]
    fn known_phrase_decodes_to_known_seed() -> Result<()> {
        let entropy = mnemonic_to_seed(KNOWN_PHRASE)?;
        assert_eq!(entropy.as_bytes(), known_seed().as_slice());
        assert!(entropy.as_seed32().is_some());
        Ok(())
    }

    /// BIP39 test vector: 128 bits of 0x00.
    #[test]
    fn entropy_16_zeros() -> Result<()> {
        let mnemonic = seed_to_mnemonic(&[0u8; 16])?;
        let words = mnemonic.words();
        assert_eq!(words.len(), 12);
        assert!(words[..11].iter().all(|w| *w == "abandon"));
        assert_eq!(words[11], "about");
        Ok(())
    }

    /// BIP39 test vector: 256 bits of 0x00.
    #[test]
    fn entropy_32_zeros() -> Result<()> {
        let mnemonic = seed_to_mnemonic(&[0u8; 32])?;
        let words = mnemonic.words();
        assert!(words[..23].iter().all(|w| *w == "abandon"));
        assert_eq!(words[23], "art");
        Ok(())
    }

    /// BIP39 test vector: 256 bits of 0xFF.
    #[test]
    fn entropy_32_ff() -> Result<()> {
        let mnemonic = seed_to_mnemonic(&[0xFFu8; 32])?;
        let words = mnemonic.words();
        assert!(words[..23].iter().all(|w| *w == "zoo"));
        assert_eq!(words[23], "vote");
        Ok(())
    }

    /// BIP39 test vector: 128 bits of 0x7F.
    #[test]
    fn entropy_16_7f() -> Result<()> {
        let mnemonic = seed_to_mnemonic(&[0x7Fu8; 16])?;
        assert_eq!(
            mnemonic.as_str(),
            "legal winner thank year wave sausage worth useful legal winner thank yellow"
        );
        Ok(())
    }

    #[test]
    fn rejects_unsupported_entropy_lengths() {
        for len in [0usize, 4, 15, 17, 31, 33, 64] {
            let result = seed_to_mnemonic(&vec![0u8; len]);
            assert_eq!(result, Err(Key2WordsError::InvalidEntropyLength { len }));
        }
    }

    #[test]
    fn encoding_is_deterministic() -> Result<()> {
        let a = seed_to_mnemonic(&known_seed())?;
        let b = seed_to_mnemonic(&known_seed())?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn rejects_23_words() {
        let phrase = "abandon ".repeat(23);
        assert_eq!(
            mnemonic_to_seed(&phrase),
            Err(Key2WordsError::InvalidWordCount { count: 23 })
        );
    }

    #[test]
    fn rejects_empty_phrase() {
        assert_eq!(
            mnemonic_to_seed("  \n "),
            Err(Key2WordsError::InvalidWordCount { count: 0 })
        );
    }

    #[test]
    fn unknown_word_reports_word_and_position() {
        let mut words: Vec<&str> = KNOWN_PHRASE.split_whitespace().collect();
        words[4] = "zzzzz";
        let phrase = words.join(" ");
        assert_eq!(
            mnemonic_to_seed(&phrase),
            Err(Key2WordsError::UnknownWord {
                word: "zzzzz".into(),
                position: 5,
            })
        );
    }

    #[test]
    fn word_count_is_checked_before_words() {
        let phrase = "zzzzz ".repeat(23);
        assert_eq!(
            mnemonic_to_seed(&phrase),
            Err(Key2WordsError::InvalidWordCount { count: 23 })
        );
    }

    #[test]
    fn rejects_bad_checksum() {
        // 24 × "abandon" has the wrong checksum (the last word must be "art").
        let phrase = vec!["abandon"; 24].join(" ");
        assert_eq!(
            mnemonic_to_seed(&phrase),
            Err(Key2WordsError::ChecksumMismatch)
        );
    }

    #[test]
    fn rejects_swapped_words() {
        let mut words: Vec<&str> = KNOWN_PHRASE.split_whitespace().collect();
        words.swap(0, 1);
        let phrase = words.join(" ");
        assert_eq!(
            mnemonic_to_seed(&phrase),
            Err(Key2WordsError::ChecksumMismatch)
        );
    }

    #[test]
    fn rejects_capitalized_word() {
        let phrase = KNOWN_PHRASE.replacen("alter", "Alter", 1);
        assert!(matches!(
            mnemonic_to_seed(&phrase),
            Err(Key2WordsError::UnknownWord { position: 1, .. })
        ));
    }

    #[test]
    fn tolerates_irregular_whitespace() -> Result<()> {
        let messy = format!("\n\t {}  \n", KNOWN_PHRASE.replace(' ', "  \t"));
        let entropy = mnemonic_to_seed(&messy)?;
        assert_eq!(entropy.as_bytes(), known_seed().as_slice());
        Ok(())
    }

    #[test]
    fn parse_returns_canonical_form() -> Result<()> {
        let messy = format!("  {}\n", KNOWN_PHRASE.replace(' ', "\n"));
        let mnemonic: Mnemonic = messy.parse()?;
        assert_eq!(mnemonic.as_str(), KNOWN_PHRASE);
        Ok(())
    }

    #[test]
    fn validate_accepts_and_rejects() {
        assert!(validate_mnemonic(KNOWN_PHRASE).is_ok());
        assert!(validate_mnemonic("abandon abandon abandon").is_err());
    }

    #[test]
    fn debug_output_is_redacted() -> Result<()> {
        let mnemonic = seed_to_mnemonic(&known_seed())?;
        let entropy = mnemonic_to_seed(mnemonic.as_str())?;
        assert_eq!(format!("{mnemonic:?}"), "Mnemonic(<24 words>)");
        assert_eq!(format!("{entropy:?}"), "Entropy(<32 bytes>)");
        Ok(())
    }

    /// With the first 23 words fixed, the last word carries 3 entropy
    /// bits and the 8 checksum bits: exactly one candidate per value of
    /// those 3 bits is accepted.
    #[test]
    fn last_word_sweep_accepts_one_per_entropy_suffix() -> Result<()> {
        let list = english()?;
        let prefix: Vec<&str> = KNOWN_PHRASE.split_whitespace().take(23).collect();

        let accepted: Vec<usize> = (0..2048)
            .filter(|&i| {
                let last = list.word_at(i).unwrap_or_default();
                let phrase = format!("{} {last}", prefix.join(" "));
                match list.decode(&phrase) {
                    Ok(_) => true,
                    Err(Key2WordsError::ChecksumMismatch) => false,
                    Err(other) => panic!("unexpected error for '{last}': {other}"),
                }
            })
            .collect();

        assert_eq!(accepted.len(), 8);
        let original = usize::from(list.index_of("lady")?);
        let same_entropy: Vec<usize> = accepted
            .iter()
            .copied()
            .filter(|i| i >> 8 == original >> 8)
            .collect();
        assert_eq!(same_entropy, vec![original]);
        Ok(())
    }

    #[test]
    fn custom_wordlist_round_trips() -> Result<()> {
        let entries: Vec<String> = (0..2048).map(|i| format!("w{i:04}")).collect();
        let list = Wordlist::from_words(entries.iter().map(String::as_str))?;

        let mnemonic = list.encode(&[0u8; 16])?;
        assert!(mnemonic.as_str().starts_with("w0000 w0000"));
        assert_eq!(list.decode(mnemonic.as_str())?.as_bytes(), &[0u8; 16]);

        // An English phrase means nothing against another dictionary.
        assert!(matches!(
            list.decode(KNOWN_PHRASE),
            Err(Key2WordsError::UnknownWord { position: 1, .. })
        ));
        Ok(())
    }
}
