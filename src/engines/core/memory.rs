//! Packed storage primitives
//!
//! This module provides the 2-bit packed byte buffer that backs DNA
//! sequences, along with the bit-addressing helpers shared by every
//! operation that reads or writes it.
//!
//! Layout: byte `i` holds the symbols at positions `4i..4i+4`, and the
//! symbol with the lower position occupies the higher-order bit pair.
//! Bits past the logical length in the last byte are always zero.

/// Number of bits used to store one symbol
pub const BITS_PER_SYMBOL: usize = 2;

/// Number of symbols stored in one byte
pub const SYMBOLS_PER_BYTE: usize = 8 / BITS_PER_SYMBOL;

/// XOR mask flipping the low bit of every 2-bit code in a byte
pub const PAIR_MASK: u8 = 0b0101_0101;

const SYMBOL_MASK: u8 = 0b11;

/// Number of bytes needed to hold `len` symbols
#[inline]
pub fn packed_len(len: usize) -> usize {
    (len + SYMBOLS_PER_BYTE - 1) / SYMBOLS_PER_BYTE
}

/// Index of the byte holding the symbol at `index`
#[inline]
pub fn byte_index(index: usize) -> usize {
    index / SYMBOLS_PER_BYTE
}

/// Right shift that brings the symbol at `index` into the low two bits
#[inline]
pub fn bit_offset(index: usize) -> usize {
    6 - (index % SYMBOLS_PER_BYTE) * BITS_PER_SYMBOL
}

/// Unpack the first `count` codes of a byte, highest bit pair first
#[inline]
fn unpack_byte(byte: u8, count: usize) -> impl Iterator<Item = u8> {
    (0..count).map(move |slot| (byte >> bit_offset(slot)) & SYMBOL_MASK)
}

/// Packed 2-bit storage for 4-symbol sequences
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PackedBuffer {
    /// The packed data (2 bits per symbol)
    data: Vec<u8>,
    /// The length of the sequence in symbols
    len: usize,
}

impl PackedBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` symbols
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(packed_len(capacity)),
            len: 0,
        }
    }

    /// Pack a stream of 2-bit codes, four per byte.
    ///
    /// Only the low two bits of every code are kept. A final group of
    /// fewer than four codes is left-aligned in its byte.
    pub fn from_codes<I>(codes: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let codes = codes.into_iter();
        let mut buffer = Self::with_capacity(codes.size_hint().0);
        for code in codes {
            buffer.push(code);
        }
        buffer
    }

    /// Append one code at the end of the buffer
    pub fn push(&mut self, code: u8) {
        if self.len % SYMBOLS_PER_BYTE == 0 {
            self.data.push(0);
        }

        let offset = bit_offset(self.len);
        if let Some(last) = self.data.last_mut() {
            *last |= (code & SYMBOL_MASK) << offset;
        }
        self.len += 1;
    }

    /// Get the length of the buffer in symbols
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the packed bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.data.capacity()
    }

    /// Get the code at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<u8> {
        if index >= self.len {
            return None;
        }
        Some(self.code_at(index))
    }

    #[inline]
    fn code_at(&self, index: usize) -> u8 {
        (self.data[byte_index(index)] >> bit_offset(index)) & SYMBOL_MASK
    }

    /// Overwrite the code at `index`, leaving the other slots of its byte intact
    ///
    /// Returns `false` and changes nothing if `index` is past the end.
    pub fn set(&mut self, index: usize, code: u8) -> bool {
        if index >= self.len {
            return false;
        }
        self.write_code(index, code);
        true
    }

    #[inline]
    fn write_code(&mut self, index: usize, code: u8) {
        let offset = bit_offset(index);
        let byte = &mut self.data[byte_index(index)];
        *byte = (*byte & !(SYMBOL_MASK << offset)) | ((code & SYMBOL_MASK) << offset);
    }

    /// Swap the codes at two positions
    ///
    /// Returns `false` and changes nothing if either position is past the end.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.len || b >= self.len {
            return false;
        }

        let first = self.code_at(a);
        let second = self.code_at(b);
        self.write_code(a, second);
        self.write_code(b, first);
        true
    }

    /// Reverse the codes in `[start, end)` in place.
    ///
    /// `end` is clamped to the buffer length; an empty range is a no-op.
    pub fn reverse_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.len);
        if start >= end {
            return;
        }

        let (mut low, mut high) = (start, end - 1);
        while low < high {
            self.swap(low, high);
            low += 1;
            high -= 1;
        }
    }

    /// Flip the low bit of every code (A<->T, G<->C under the DNA codec)
    pub fn pair_in_place(&mut self) {
        for byte in &mut self.data {
            *byte ^= PAIR_MASK;
        }
        self.clear_padding();
    }

    /// Zero the unused low bits of the last byte
    fn clear_padding(&mut self) {
        let used = self.len % SYMBOLS_PER_BYTE;
        if used == 0 {
            return;
        }
        if let Some(last) = self.data.last_mut() {
            *last &= !0u8 << (8 - used * BITS_PER_SYMBOL);
        }
    }

    /// Iterate over every code in order
    pub fn codes(&self) -> impl DoubleEndedIterator<Item = u8> + ExactSizeIterator + '_ {
        (0..self.len).map(move |index| self.code_at(index))
    }

    /// Unpack the codes in `[start, end)`.
    ///
    /// Walks a leading partial byte symbol by symbol, then whole aligned
    /// bytes, then the trailing partial byte. `end` is clamped.
    pub fn unpack_codes(&self, start: usize, end: usize) -> Vec<u8> {
        let end = end.min(self.len);
        if start >= end {
            return Vec::new();
        }

        let mut codes = Vec::with_capacity(end - start);
        let mut pos = start;

        let lead = pos % SYMBOLS_PER_BYTE;
        if lead != 0 {
            let stop = (pos - lead + SYMBOLS_PER_BYTE).min(end);
            let byte = self.data[byte_index(pos)] << (lead * BITS_PER_SYMBOL);
            codes.extend(unpack_byte(byte, stop - pos));
            pos = stop;
        }

        while pos + SYMBOLS_PER_BYTE <= end {
            codes.extend(unpack_byte(self.data[byte_index(pos)], SYMBOLS_PER_BYTE));
            pos += SYMBOLS_PER_BYTE;
        }

        if pos < end {
            codes.extend(unpack_byte(self.data[byte_index(pos)], end - pos));
        }

        codes
    }

    /// Copy `[start, end)` into a new buffer by shifting packed bytes.
    ///
    /// Produces the same bytes as packing `unpack_codes(start, end)`.
    pub fn extract(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.len);
        if start >= end {
            return Self::new();
        }

        let len = end - start;
        let first = byte_index(start);
        let shift = (start % SYMBOLS_PER_BYTE) * BITS_PER_SYMBOL;

        let data = (0..packed_len(len))
            .map(|i| {
                let high = self.data[first + i] << shift;
                let low = if shift == 0 {
                    0
                } else {
                    self.data
                        .get(first + i + 1)
                        .map_or(0, |&next| next >> (8 - shift))
                };
                high | low
            })
            .collect();

        let mut buffer = Self { data, len };
        buffer.clear_padding();
        buffer
    }
}
