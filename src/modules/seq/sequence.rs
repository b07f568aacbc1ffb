//! Core sequence type
//!
//! This module provides [`Sequence`], a DNA sequence stored at two bits
//! per base, together with the operations that work on its packed form:
//! pairing, in-place reversal, slicing, indexed access and substring search.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Bound, Range, RangeBounds};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::engines::compute::string_ops;
use crate::engines::core::memory::PackedBuffer;
use super::alphabet::{self, Nucleotide};

/// Error type for sequence operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// The input held a character outside `ATGCatgc`; `position` is a byte offset
    #[error("Invalid nucleotide '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },
}

/// Result type for sequence operations
pub type SequenceResult<T> = Result<T, SequenceError>;

/// How [`Sequence::slice_with`] builds the new packed buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliceStrategy {
    /// Decode the range to nucleotides and pack them again
    #[default]
    Reencode,
    /// Shift the packed bytes directly
    BitShift,
}

/// Resolve any range against a sequence of length `len`, clamping the end
fn resolve_range<R: RangeBounds<usize>>(range: &R, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.saturating_add(1),
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };

    start..end.min(len)
}

/// Encode a pattern for searching; `None` if it can never match
fn pattern_codes(pattern: &str) -> Option<Vec<u8>> {
    pattern.bytes().map(alphabet::encode).collect()
}

fn invalid_symbol(symbol: char, position: usize) -> SequenceError {
    log::debug!("Rejected nucleotide {:?} at position {}", symbol, position);
    SequenceError::InvalidSymbol { symbol, position }
}

/// A DNA sequence packed at four bases per byte
///
/// Cloning deep-copies the packed buffer. Only [`Sequence::reverse`] and
/// [`Sequence::reverse_range`] mutate a sequence; every other transform
/// returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sequence {
    /// The packed sequence data
    data: PackedBuffer,
}

impl Sequence {
    /// Create a new sequence from text, ignoring case
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidSymbol`] for the first character
    /// that is not one of `ATGCatgc`.
    pub fn new(text: &str) -> SequenceResult<Self> {
        Self::pack(text.as_bytes()).map_err(|position| {
            // Everything before `position` is ASCII, so it is a char boundary
            let symbol = text[position..]
                .chars()
                .next()
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            invalid_symbol(symbol, position)
        })
    }

    /// Create a new sequence from a bounded span of ASCII bytes
    pub fn from_bytes(data: &[u8]) -> SequenceResult<Self> {
        Self::pack(data).map_err(|position| invalid_symbol(char::from(data[position]), position))
    }

    /// Validate and pack in one pass, returning the offending offset on failure
    fn pack(data: &[u8]) -> Result<Self, usize> {
        let mut packed = PackedBuffer::with_capacity(data.len());
        for (position, &byte) in data.iter().enumerate() {
            let code = alphabet::encode(byte).ok_or(position)?;
            packed.push(code);
        }

        Ok(Self { data: packed })
    }

    /// Create an empty sequence
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the sequence length in bases
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the packed bytes, four bases per byte
    pub fn as_packed(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Get the memory usage of the packed buffer in bytes
    pub fn memory_usage(&self) -> usize {
        self.data.memory_usage()
    }

    /// Get the base at `index` as an uppercase character
    ///
    /// Returns `None` if `index` is past the end.
    pub fn get(&self, index: usize) -> Option<char> {
        self.nucleotide(index).map(Nucleotide::to_char)
    }

    /// Get the base at `index`
    pub fn nucleotide(&self, index: usize) -> Option<Nucleotide> {
        self.data.get(index).map(Nucleotide::from_code)
    }

    /// Iterate over the bases in order
    pub fn iter(&self) -> Nucleotides<'_> {
        Nucleotides {
            data: &self.data,
            range: 0..self.len(),
        }
    }

    /// Decode to uppercase ASCII bytes, exactly `len()` long
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data
            .unpack_codes(0, self.len())
            .into_iter()
            .map(alphabet::decode)
            .collect()
    }

    /// Decode to an uppercase string
    pub fn as_string(&self) -> String {
        self.to_bytes().into_iter().map(char::from).collect()
    }

    /// Get the paired sequence (A<->T, G<->C)
    pub fn pair(&self) -> Self {
        let mut paired = self.clone();
        paired.data.pair_in_place();
        paired
    }

    /// Reverse the whole sequence in place
    pub fn reverse(&mut self) {
        self.data.reverse_range(0, self.len());
    }

    /// Reverse the bases in `range` in place
    ///
    /// The end of the range is clamped to the sequence length, and a range
    /// starting at or past the end leaves the sequence unchanged.
    ///
    /// ```
    /// use packed_dna::Sequence;
    ///
    /// let mut seq = Sequence::new("aattgc").unwrap();
    /// seq.reverse_range(2..);
    /// assert_eq!(seq.as_string(), "AACGTT");
    /// ```
    pub fn reverse_range<R: RangeBounds<usize>>(&mut self, range: R) {
        let Range { start, end } = resolve_range(&range, self.len());
        self.data.reverse_range(start, end);
    }

    /// Copy `range` into a new sequence
    ///
    /// The end is clamped to the sequence length; an empty range gives an
    /// empty sequence.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Self {
        self.slice_with(range, SliceStrategy::default())
    }

    /// Copy `range` into a new sequence using the given strategy
    ///
    /// Both strategies produce identical packed bytes.
    pub fn slice_with<R: RangeBounds<usize>>(&self, range: R, strategy: SliceStrategy) -> Self {
        let Range { start, end } = resolve_range(&range, self.len());
        if start >= end {
            return Self::empty();
        }

        log::trace!("Slicing {}..{} of {} bases with {:?}", start, end, self.len(), strategy);

        match strategy {
            SliceStrategy::Reencode => self
                .data
                .unpack_codes(start, end)
                .into_iter()
                .map(Nucleotide::from_code)
                .collect(),
            SliceStrategy::BitShift => Self {
                data: self.data.extract(start, end),
            },
        }
    }

    /// Check whether `pattern` matches at `start`, ignoring case in the pattern
    pub fn match_at(&self, pattern: &str, start: usize) -> bool {
        pattern_codes(pattern)
            .map_or(false, |codes| string_ops::match_at(&self.data, &codes, start))
    }

    /// Find the start of every occurrence of `pattern`, in ascending order
    ///
    /// Overlapping occurrences are all reported.
    ///
    /// ```
    /// use packed_dna::Sequence;
    ///
    /// let seq = Sequence::new("aaaaaa").unwrap();
    /// assert_eq!(seq.find_all("aaaaa"), vec![0, 1]);
    /// assert!(seq.find_all("tt").is_empty());
    /// ```
    pub fn find_all(&self, pattern: &str) -> Vec<usize> {
        self.search(pattern, None)
    }

    /// Find the first `limit` occurrences of `pattern`
    pub fn find_n(&self, pattern: &str, limit: usize) -> Vec<usize> {
        self.search(pattern, Some(limit))
    }

    fn search(&self, pattern: &str, limit: Option<usize>) -> Vec<usize> {
        pattern_codes(pattern)
            .map(|codes| string_ops::find_all(&self.data, &codes, limit))
            .unwrap_or_default()
    }

    /// Count the occurrences of `pattern`
    pub fn count(&self, pattern: &str) -> usize {
        pattern_codes(pattern).map_or(0, |codes| string_ops::count(&self.data, &codes))
    }

    /// Check whether `pattern` occurs anywhere
    pub fn contains(&self, pattern: &str) -> bool {
        pattern_codes(pattern).map_or(false, |codes| string_ops::contains(&self.data, &codes))
    }

    /// Find the start of the `n`-th occurrence of `pattern`, counting from 1
    ///
    /// Returns `None` when there are fewer than `n` occurrences.
    pub fn find_nth(&self, pattern: &str, n: usize) -> Option<usize> {
        pattern_codes(pattern).and_then(|codes| string_ops::find_nth(&self.data, &codes, n))
    }
}

/// Iterator over the bases of a [`Sequence`]
#[derive(Debug, Clone)]
pub struct Nucleotides<'a> {
    data: &'a PackedBuffer,
    range: Range<usize>,
}

impl<'a> Iterator for Nucleotides<'a> {
    type Item = Nucleotide;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.range.next()?;
        self.data.get(index).map(Nucleotide::from_code)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Nucleotides<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.range.next_back()?;
        self.data.get(index).map(Nucleotide::from_code)
    }
}

impl<'a> ExactSizeIterator for Nucleotides<'a> {}

impl<'a> FusedIterator for Nucleotides<'a> {}

impl<'a> IntoIterator for &'a Sequence {
    type Item = Nucleotide;
    type IntoIter = Nucleotides<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Nucleotide> for Sequence {
    fn from_iter<I: IntoIterator<Item = Nucleotide>>(iter: I) -> Self {
        Self {
            data: PackedBuffer::from_codes(iter.into_iter().map(Nucleotide::code)),
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl FromStr for Sequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Get a sequence from a string, falling back to an empty sequence
///
/// Invalid input is reported as a warning through `log`.
impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        Self::new(s).unwrap_or_else(|err| {
            log::warn!("{}; using an empty sequence instead", err);
            Self::empty()
        })
    }
}

impl Serialize for Sequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de> Deserialize<'de> for Sequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::new(&text).map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dna_text(max_len: usize) -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![
                Just('A'), Just('T'), Just('G'), Just('C'),
                Just('a'), Just('t'), Just('g'), Just('c'),
            ],
            0..=max_len,
        )
        .prop_map(|chars| chars.into_iter().collect::<String>())
    }

    proptest! {
        #[test]
        fn roundtrip_uppercases(text in dna_text(64)) {
            let seq = Sequence::new(&text).unwrap();
            prop_assert_eq!(seq.as_string(), text.to_ascii_uppercase());
            prop_assert_eq!(seq.as_packed().len(), (text.len() + 3) / 4);
        }

        #[test]
        fn pair_swaps_every_base(text in dna_text(64)) {
            let seq = Sequence::new(&text).unwrap();
            let paired = seq.pair();
            for (original, complement) in seq.iter().zip(paired.iter()) {
                prop_assert_eq!(complement, original.pair());
            }
            prop_assert_eq!(paired.pair(), seq);
        }

        #[test]
        fn reverse_range_is_involution(text in dna_text(64), a in 0usize..70, b in 0usize..70) {
            let original = Sequence::new(&text).unwrap();
            let mut seq = original.clone();
            seq.reverse_range(a..b);
            seq.reverse_range(a..b);
            prop_assert_eq!(seq, original);
        }

        #[test]
        fn reverse_range_matches_slice_reverse(
            text in dna_text(64),
            a in 0usize..70,
            b in 0usize..70
        ) {
            let mut seq = Sequence::new(&text).unwrap();
            let mut expected = text.to_ascii_uppercase().into_bytes();
            let end = b.min(expected.len());
            if a < end {
                expected[a..end].reverse();
            }
            seq.reverse_range(a..b);
            prop_assert_eq!(seq.to_bytes(), expected);
        }

        #[test]
        fn slice_length_and_content(text in dna_text(64), a in 0usize..70, b in 0usize..70) {
            let seq = Sequence::new(&text).unwrap();
            let end = b.min(seq.len());
            let sliced = seq.slice(a..b);
            if a < end {
                prop_assert_eq!(sliced.len(), end - a);
                prop_assert_eq!(sliced.as_string(), text[a..end].to_ascii_uppercase());
            } else {
                prop_assert!(sliced.is_empty());
            }
        }

        #[test]
        fn rejects_foreign_characters(
            prefix in dna_text(16),
            bad in "[^ATGCatgc]",
            suffix in dna_text(16)
        ) {
            let text = format!("{}{}{}", prefix, bad, suffix);
            let err = Sequence::new(&text).unwrap_err();
            let SequenceError::InvalidSymbol { position, .. } = err;
            prop_assert_eq!(position, prefix.len());
            prop_assert_eq!(Sequence::from(text.as_str()).len(), 0);
        }

        #[test]
        fn bounded_search_is_prefix(text in dna_text(64), pattern in dna_text(3), n in 0usize..8) {
            let seq = Sequence::new(&text).unwrap();
            let all = seq.find_all(&pattern);
            let bounded = seq.find_n(&pattern, n);
            prop_assert_eq!(&bounded[..], &all[..n.min(all.len())]);
            prop_assert_eq!(seq.count(&pattern), all.len());
            prop_assert_eq!(seq.contains(&pattern), !all.is_empty());
        }
    }
}
