//! Substring search over packed sequence data
//!
//! Patterns are given as 2-bit codes and compared directly against the
//! packed haystack, so the haystack is never decoded. Every start
//! position is tested, which reports overlapping occurrences.

use crate::engines::core::memory::PackedBuffer;

/// Check whether `pattern` occurs in `text` starting at `start`
///
/// Returns `false` when fewer than `pattern.len()` symbols remain after
/// `start`. An empty pattern matches at every position up to `text.len()`.
pub fn match_at(text: &PackedBuffer, pattern: &[u8], start: usize) -> bool {
    if start > text.len() || text.len() - start < pattern.len() {
        return false;
    }

    pattern
        .iter()
        .enumerate()
        .all(|(i, &code)| text.get(start + i) == Some(code))
}

/// Find the start of every occurrence of `pattern` in `text`
///
/// Positions are returned in ascending order. Scanning stops once
/// `limit` occurrences have been collected, if a limit is given.
/// A pattern longer than the text yields no positions; an empty pattern
/// matches at every position `0..=text.len()`.
pub fn find_all(text: &PackedBuffer, pattern: &[u8], limit: Option<usize>) -> Vec<usize> {
    if pattern.len() > text.len() {
        return Vec::new();
    }

    let limit = limit.unwrap_or(usize::MAX);
    (0..=text.len() - pattern.len())
        .filter(|&start| match_at(text, pattern, start))
        .take(limit)
        .collect()
}

/// Count the occurrences of `pattern` in `text`
pub fn count(text: &PackedBuffer, pattern: &[u8]) -> usize {
    find_all(text, pattern, None).len()
}

/// Check whether `pattern` occurs anywhere in `text`
pub fn contains(text: &PackedBuffer, pattern: &[u8]) -> bool {
    find_all(text, pattern, Some(1)).len() == 1
}

/// Find the start of the `n`-th occurrence (1-based) of `pattern` in `text`
///
/// Returns `None` if there are fewer than `n` occurrences or `n` is zero.
pub fn find_nth(text: &PackedBuffer, pattern: &[u8], n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }

    let matches = find_all(text, pattern, Some(n));
    if matches.len() == n {
        matches.last().copied()
    } else {
        None
    }
}
