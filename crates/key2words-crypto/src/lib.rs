//! Seed-to-words encoding for key2words.
//!
//! Turns the 32-byte seed of an Ed25519 key into a 24-word BIP39
//! phrase and back, and rebuilds the key pair from a recovered seed.
//!
//! # Modules
//!
//! - [`wordlist`]: the 2048-word BIP39 English dictionary
//! - [`bits`]: MSB-first bit packing shared by encoder and decoder
//! - [`hash`]: SHA-256 and checksum extraction
//! - [`mnemonic`]: entropy ↔ mnemonic conversion
//! - [`signing`]: Ed25519 key pair from a seed

pub mod bits;
pub mod hash;
pub mod mnemonic;
pub mod signing;
pub mod wordlist;

pub use mnemonic::{
    mnemonic_to_seed, seed_to_mnemonic, validate_mnemonic, Entropy, Mnemonic,
};
pub use wordlist::{english, Wordlist};
