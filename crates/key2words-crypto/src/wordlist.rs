//! The BIP39 dictionary: 2048 words, indexed both ways.
//!
//! Entry order defines the index mapping and therefore every mnemonic
//! ever produced; the embedded English list must never be edited.
//!
//! A [`Wordlist`] is validated once when it is built. After that,
//! [`Wordlist::word_at`] is a slice index and [`Wordlist::index_of`]
//! a hash lookup, and neither can fail for any reason other than a bad
//! argument.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use key2words_types::{Key2WordsError, Result};

/// Number of entries in every BIP39 wordlist (2^11).
pub const WORDLIST_LEN: usize = 2048;

/// Bits of the combined bitstream carried by one word.
pub const BITS_PER_WORD: usize = 11;

/// The BIP39 English wordlist, one word per line.
const ENGLISH_SOURCE: &str = include_str!("english.txt");

static ENGLISH: OnceLock<Result<Wordlist<'static>>> = OnceLock::new();

// ---------------------------------------------------------------------------
// Wordlist
// ---------------------------------------------------------------------------

/// An immutable, validated 2048-entry dictionary.
pub struct Wordlist<'a> {
    /// Index → word.
    words: Vec<&'a str>,
    /// Word → index.
    indices: HashMap<&'a str, u16>,
}

impl<'a> Wordlist<'a> {
    /// Builds a wordlist from its entries, in index order.
    ///
    /// # Errors
    ///
    /// Returns [`Key2WordsError::InvalidWordlist`] unless there are
    /// exactly 2048 entries, all distinct, non-empty and free of
    /// whitespace (a word containing whitespace could never be matched
    /// in a phrase).
    pub fn from_words<I>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let words: Vec<&'a str> = words.into_iter().collect();

        if words.len() != WORDLIST_LEN {
            return Err(Key2WordsError::InvalidWordlist {
                reason: format!("expected {WORDLIST_LEN} words, got {}", words.len()),
            });
        }

        let mut indices = HashMap::with_capacity(WORDLIST_LEN);
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() || word.chars().any(char::is_whitespace) {
                return Err(Key2WordsError::InvalidWordlist {
                    reason: format!("entry {i} is empty or contains whitespace"),
                });
            }

            // i < 2048 by the length check above.
            if let Some(first) = indices.insert(*word, i as u16) {
                return Err(Key2WordsError::InvalidWordlist {
                    reason: format!("duplicate word '{word}' at indices {first} and {i}"),
                });
            }
        }

        Ok(Self { words, indices })
    }

    /// Parses a newline-separated wordlist, as distributed with BIP39.
    ///
    /// Surrounding whitespace on each line is ignored.
    pub fn parse(text: &'a str) -> Result<Self> {
        Self::from_words(text.lines().map(str::trim))
    }

    /// Returns the word at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Key2WordsError::IndexOutOfRange`] if `index >= 2048`.
    pub fn word_at(&self, index: usize) -> Result<&'a str> {
        self.words
            .get(index)
            .copied()
            .ok_or(Key2WordsError::IndexOutOfRange { index })
    }

    /// Returns the index of `word`.
    ///
    /// The match is exact: no case folding or Unicode normalization.
    ///
    /// # Errors
    ///
    /// Returns [`Key2WordsError::WordNotFound`] if `word` is not an entry.
    pub fn index_of(&self, word: &str) -> Result<u16> {
        self.indices
            .get(word)
            .copied()
            .ok_or_else(|| Key2WordsError::WordNotFound {
                word: word.to_string(),
            })
    }

    /// Returns `true` if `word` is an entry.
    pub fn contains(&self, word: &str) -> bool {
        self.indices.contains_key(word)
    }

    /// Iterates over the entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.words.iter().copied()
    }
}

impl fmt::Debug for Wordlist<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wordlist")
            .field("first", &self.words.first())
            .field("last", &self.words.last())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// English
// ---------------------------------------------------------------------------

/// Returns the process-wide BIP39 English wordlist.
///
/// Parsed and validated on first call. If the embedded list were ever
/// malformed, every call returns the same
/// [`Key2WordsError::InvalidWordlist`], so neither encoding nor
/// decoding can run against a broken dictionary.
pub fn english() -> Result<&'static Wordlist<'static>> {
    ENGLISH
        .get_or_init(|| Wordlist::parse(ENGLISH_SOURCE))
        .as_ref()
        .map_err(Clone::clone)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
