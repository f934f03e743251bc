//! Constant values for mcapi operations
//!
//! Digest and block sizes, codec flags and return codes, and the fixed
//! sizes used by the conformance harness.

#![no_std]

pub mod utils;

pub use utils::codec;
pub use utils::harness;
pub use utils::hash;
