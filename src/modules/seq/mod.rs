//! Sequence module
//!
//! This module provides the nucleotide alphabet and the packed DNA
//! sequence type built on it.

pub mod sequence;
pub mod alphabet;

/// Convenience re-exports
pub use sequence::{Nucleotides, Sequence, SequenceError, SequenceResult, SliceStrategy};
pub use alphabet::Nucleotide;
