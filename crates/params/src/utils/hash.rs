//! Constants for hash functions

/// Output size of MD5 in bytes
pub const MD5_OUTPUT_SIZE: usize = 16;

/// Output size of SHA-1 in bytes
pub const SHA1_OUTPUT_SIZE: usize = 20;

/// Output size of SHA-256 in bytes
pub const SHA256_OUTPUT_SIZE: usize = 32;

/// Output size of SHA-384 in bytes
pub const SHA384_OUTPUT_SIZE: usize = 48;

/// Output size of SHA-512 in bytes
pub const SHA512_OUTPUT_SIZE: usize = 64;

/// Internal block size of MD5 in bytes
pub const MD5_BLOCK_SIZE: usize = 64;

/// Internal block size of SHA-1 in bytes
pub const SHA1_BLOCK_SIZE: usize = 64;

/// Internal block size of SHA-256 in bytes
pub const SHA256_BLOCK_SIZE: usize = 64;

/// Internal block size of SHA-512 (and SHA-384) in bytes
pub const SHA512_BLOCK_SIZE: usize = 128;

/// Largest block size among the supported hashes
pub const MAX_BLOCK_SIZE: usize = SHA512_BLOCK_SIZE;
