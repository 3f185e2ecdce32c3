//! MSB-first bit cursor over byte buffers.
//!
//! Mnemonic words carry 11 bits each, so the combined
//! `entropy || checksum` stream crosses byte boundaries on almost every
//! word. Both directions of the codec go through these two types:
//! bit 0 of the stream is the most significant bit of byte 0.

use zeroize::Zeroize;

// ---------------------------------------------------------------------------
// BitWriter
// ---------------------------------------------------------------------------

/// Appends bit groups to a growable buffer, MSB-first.
///
/// The buffer may hold secret material; it is zeroized on drop.
#[derive(Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    /// Number of bits written. The tail of the last byte is zero.
    len: usize,
}

impl BitWriter {
    /// Creates a writer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Appends the low `count` bits of `value`, most significant first.
    ///
    /// `count` must be at most 32.
    pub fn write_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32, "write_bits count {count} exceeds 32");
        for shift in (0..count.min(32)).rev() {
            self.push_bit((value >> shift) & 1 == 1);
        }
    }

    /// Appends every bit of `bytes`.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.len % 8 == 0 {
            self.bytes.extend_from_slice(bytes);
            self.len += bytes.len() * 8;
        } else {
            for byte in bytes {
                self.write_bits(u32::from(*byte), 8);
            }
        }
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.len
    }

    /// Returns a reader over the bits written so far.
    pub fn reader(&self) -> BitReader<'_> {
        BitReader::with_bit_len(&self.bytes, self.len)
    }

    fn push_bit(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.len += 1;
    }
}

impl Drop for BitWriter {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

// ---------------------------------------------------------------------------
// BitReader
// ---------------------------------------------------------------------------

/// Reads bit groups from a byte slice, MSB-first.
pub struct BitReader<'a> {
    bytes: &'a [u8],
    /// Next bit to read.
    pos: usize,
    /// Bits available; never more than `bytes.len() * 8`.
    len: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader over every bit of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_bit_len(bytes, bytes.len() * 8)
    }

    /// Creates a reader over the first `len` bits of `bytes`.
    pub fn with_bit_len(bytes: &'a [u8], len: usize) -> Self {
        Self {
            bytes,
            pos: 0,
            len: len.min(bytes.len() * 8),
        }
    }

    /// Reads the next `count` bits as an unsigned integer.
    ///
    /// Returns `None`, consuming nothing, if fewer than `count` bits
    /// remain or `count` exceeds 32.
    pub fn read_bits(&mut self, count: usize) -> Option<u32> {
        if count > 32 || count > self.remaining() {
            return None;
        }

        let mut value = 0u32;
        for _ in 0..count {
            let byte = self.bytes[self.pos / 8];
            let bit = (byte >> (7 - self.pos % 8)) & 1;
            value = (value << 1) | u32::from(bit);
            self.pos += 1;
        }
        Some(value)
    }

    /// Number of unread bits.
    pub fn remaining(&self) -> usize {
        self.len - self.pos
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
