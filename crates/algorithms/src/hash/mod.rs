//! Hash function implementations
//!
//! MD5, SHA-1 and the SHA-2 members exposed by the vendor API, all behind
//! the streaming [`HashFunction`] trait.

pub mod md5;
pub mod sha1;
pub mod sha2;

// Re-exports
pub use md5::Md5;
pub use sha1::Sha1;
pub use sha2::{Sha256, Sha384, Sha512};

use crate::error::Result;

/// Raw hash output produced by the internal finalize routines
pub type Hash = Vec<u8>;

/// Compile-time description of a hash algorithm
pub trait HashAlgorithm {
    /// Digest length in bytes
    const OUTPUT_SIZE: usize;
    /// Compression function block length in bytes
    const BLOCK_SIZE: usize;
    /// Standard algorithm name
    const ALGORITHM_ID: &'static str;
}

/// Trait for streaming hash functions
pub trait HashFunction: Sized {
    /// Marker type describing the algorithm
    type Algorithm: HashAlgorithm;

    /// Fixed-size digest type
    type Output: AsRef<[u8]> + Clone;

    /// Creates a new instance of the hash function
    fn new() -> Self;

    /// Updates the hash function state with new data
    fn update(&mut self, data: &[u8]) -> Result<&mut Self>;

    /// Finalizes the hash computation and returns the digest.
    ///
    /// The instance is reset to its initial state afterwards.
    fn finalize(&mut self) -> Result<Self::Output>;

    /// Returns the output size of the hash function in bytes
    fn output_size() -> usize {
        Self::Algorithm::OUTPUT_SIZE
    }

    /// Returns the block size of the hash function in bytes
    fn block_size() -> usize {
        Self::Algorithm::BLOCK_SIZE
    }

    /// Returns the name of the hash function
    fn name() -> String {
        Self::Algorithm::ALGORITHM_ID.to_string()
    }

    /// Convenience method to hash data in a single call
    fn digest(data: &[u8]) -> Result<Self::Output> {
        let mut hasher = Self::new();
        hasher.update(data)?;
        hasher.finalize()
    }
}
