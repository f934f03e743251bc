//! Error handling for the mcapi primitives

use std::borrow::Cow;
use core::fmt;

use mcapi_api::Error as ApiError;

/// The error type for primitive operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: Cow<'static, str>,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Processing error during an operation
    Processing {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for primitive operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::Processing { operation, details } => {
                write!(f, "Processing error in {}: {}", operation, details)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parameter { name, reason } => ApiError::InvalidParameter {
                context: "primitives",
                message: format!("{}: {}", name, reason),
            },
            Error::Length {
                context,
                expected,
                actual,
            } => ApiError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::Processing { operation, details } => ApiError::Other {
                context: operation,
                message: details.into(),
            },
        }
    }
}

// Include the validation submodule
pub mod validate;
