//! Compact DNA sequences stored at two bits per base.
//!
//! A [`Sequence`] packs four nucleotides into every byte and runs pairing,
//! in-place reversal, slicing and substring search directly on the packed
//! bytes.
//!
//! ```
//! use packed_dna::Sequence;
//!
//! let seq = Sequence::new("aatttccccggggg").unwrap();
//! assert_eq!(seq.slice(3..11).to_string(), "TTCCCCGG");
//! assert_eq!(seq.pair().to_string(), "TTAAAGGGGCCCCC");
//! assert_eq!(seq.find_nth("gg", 2), Some(10));
//! ```

pub mod engines;
pub mod modules;

pub use modules::seq::{
    Nucleotide, Nucleotides, Sequence, SequenceError, SequenceResult, SliceStrategy,
};
