//! SHA-256 hashing and BIP39 checksum extraction.

use sha2::{Digest, Sha256};

/// Computes the SHA-256 hash of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

/// Returns the first `bits` bits of `SHA-256(entropy)` as an integer.
///
/// BIP39 uses `entropy_bits / 32` checksum bits, so `bits` is 4–8 for
/// the standard table; anything up to 32 is accepted.
pub fn checksum(entropy: &[u8], bits: usize) -> u32 {
    if bits == 0 {
        return 0;
    }
    let hash = sha256(entropy);
    let head = u32::from_be_bytes([hash[0], hash[1], hash[2], hash[3]]);
    head >> (32 - bits.min(32))
}
