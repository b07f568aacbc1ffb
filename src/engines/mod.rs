//! Low-level engines for packed sequence data
//!
//! `core` owns the packed byte layout and its bit addressing, and
//! `compute` builds search primitives on top of it. Everything in this
//! layer works on 2-bit codes; mapping codes to nucleotides is left to
//! the sequence modules.

pub mod core;
pub mod compute;
