//! Error handling for the capability surface

pub mod types;

// Re-export the primary error type and result
pub use types::{codec_result, CodecError, CodecResult, Error, Result};
