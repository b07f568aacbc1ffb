//! Bioinformatics modules
//!
//! Sequence-level types built on the packed storage engines.

pub mod seq;
