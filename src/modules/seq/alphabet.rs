//! Nucleotide alphabet and its 2-bit codec
//!
//! Accepted input is `A`, `T`, `G`, `C` in either case. The codes are
//! chosen so that pairing a base only flips its low bit:
//!
//! | Base | Code |
//! |------|------|
//! | A    | 00   |
//! | T    | 01   |
//! | G    | 10   |
//! | C    | 11   |

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single DNA base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Nucleotide {
    A = 0b00,
    T = 0b01,
    G = 0b10,
    C = 0b11,
}

impl Nucleotide {
    /// Every nucleotide, in code order
    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::T, Nucleotide::G, Nucleotide::C];

    /// Parse an ASCII byte, ignoring case
    #[inline]
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            b'A' | b'a' => Some(Nucleotide::A),
            b'T' | b't' => Some(Nucleotide::T),
            b'G' | b'g' => Some(Nucleotide::G),
            b'C' | b'c' => Some(Nucleotide::C),
            _ => None,
        }
    }

    /// Parse a character, ignoring case
    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii() {
            Self::from_ascii(c as u8)
        } else {
            None
        }
    }

    /// Build a nucleotide from the low two bits of `code`
    #[inline]
    pub const fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0b00 => Nucleotide::A,
            0b01 => Nucleotide::T,
            0b10 => Nucleotide::G,
            _ => Nucleotide::C,
        }
    }

    /// The 2-bit code of this nucleotide
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Uppercase ASCII byte
    #[inline]
    pub const fn to_ascii(self) -> u8 {
        match self {
            Nucleotide::A => b'A',
            Nucleotide::T => b'T',
            Nucleotide::G => b'G',
            Nucleotide::C => b'C',
        }
    }

    /// Uppercase character
    #[inline]
    pub const fn to_char(self) -> char {
        self.to_ascii() as char
    }

    /// The paired base (A<->T, G<->C)
    #[inline]
    pub const fn pair(self) -> Self {
        Self::from_code(self.code() ^ 0b01)
    }
}

impl TryFrom<char> for Nucleotide {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or(c)
    }
}

impl From<Nucleotide> for char {
    fn from(nucleotide: Nucleotide) -> Self {
        nucleotide.to_char()
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Encode an ASCII byte to its 2-bit code
pub fn encode(byte: u8) -> Option<u8> {
    Nucleotide::from_ascii(byte).map(Nucleotide::code)
}

/// Decode a 2-bit code to an uppercase ASCII byte
pub fn decode(code: u8) -> u8 {
    Nucleotide::from_code(code).to_ascii()
}

/// Check that every byte of `text` is a valid nucleotide
pub fn validate(text: &[u8]) -> bool {
    find_invalid(text).is_none()
}

/// Position and value of the first byte that is not a valid nucleotide
pub fn find_invalid(text: &[u8]) -> Option<(usize, u8)> {
    text.iter()
        .position(|&b| encode(b).is_none())
        .map(|pos| (pos, text[pos]))
}
