//! Primitives backing the mcapi vendor API
//!
//! This crate provides pure-Rust implementations of the hash functions,
//! the HMAC construction, and the Huffman codec that the `mcapi` facade
//! exposes through its C-shaped contexts.
//!
//! - Hash state is zeroized when dropped
//! - HMAC tag verification is constant-time
//! - The codec writes into caller-provided buffers and never grows them

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Hash function implementations
pub mod hash;
pub use hash::{HashAlgorithm, HashFunction, Md5, Sha1, Sha256, Sha384, Sha512};

// MAC implementations
pub mod mac;
pub use mac::Hmac;

// Huffman codec
pub mod compress;
pub use compress::{HuffmanCodec, HuffmanMode};

// Type system
pub mod types;
pub use types::Digest;
