//! Core storage engine
//!
//! This module provides the packed 2-bit buffer used by every sequence.

pub mod memory;

pub use memory::{PackedBuffer, BITS_PER_SYMBOL, PAIR_MASK, SYMBOLS_PER_BYTE};
