//! Fixed sizes used by the conformance harness

/// Length of the counting data vector
pub const DATA_SIZE: usize = 1024;

/// Capacity of the HMAC key buffer
pub const KEY_CAPACITY: usize = 32;

/// Capacity of each compression / decompression buffer
pub const CODEC_BUFFER_SIZE: usize = 1024;
