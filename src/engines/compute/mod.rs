//! Compute primitives for packed sequences
//!
//! This module provides search operations that run directly on
//! packed 2-bit data.

pub mod string_ops;
