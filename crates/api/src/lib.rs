//! Public API traits and types for mcapi
//!
//! This crate defines the capability surface that both the vendor API and
//! any reference implementation expose to the conformance harness: hash
//! contexts, keyed HMAC contexts, and a byte-buffer Huffman codec, plus the
//! selectors and error types they share.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{codec_result, CodecError, CodecResult, Error, Result};
pub use types::{CompressMode, HashAlgorithm, HmacAlgorithm};

// Re-export all traits from the traits module
pub use traits::{CryptoProvider, HashContext, HmacContext};
