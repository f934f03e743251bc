//! Error type definitions for provider operations

use thiserror::Error;

/// Primary error type for hash and HMAC provider operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid length error with context
    #[error("invalid length for {context}: expected {expected}, got {actual}")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter error
    #[error("invalid parameter '{context}': {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// Operation called in the wrong lifecycle state (e.g. update before set_key)
    #[error("invalid state in {context}: {message}")]
    InvalidState {
        context: &'static str,
        message: String,
    },

    /// Other error
    #[error("{context}: {message}")]
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for provider operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error, keeping its details
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidLength { expected, actual, .. } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::InvalidState { message, .. } => Self::InvalidState { context, message },
            Self::Other { message, .. } => Self::Other { context, message },
        }
    }
}

/// A negative return code from a compress or decompress call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("codec returned error code {code}")]
pub struct CodecError {
    /// The raw (negative) code reported by the codec
    pub code: i32,
}

/// Bytes written on success, the codec's error code otherwise
pub type CodecResult = core::result::Result<usize, CodecError>;

/// Map a C-style codec return value onto [`CodecResult`].
///
/// Non-negative values are byte counts; anything below zero is an error code.
pub fn codec_result(ret: i32) -> CodecResult {
    usize::try_from(ret).map_err(|_| CodecError { code: ret })
}
