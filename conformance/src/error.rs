//! Failure taxonomy for the conformance run
//!
//! Every failure renders as the single diagnostic line the report prints
//! before the `mcapi check_<name> failed` trailer.

use std::fmt;

use mcapi_api::{CodecResult, CompressMode, Error as ApiError};
use thiserror::Error;

/// Which implementation a call or decoder belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The API under test
    Vendor,
    /// The trusted oracle
    Reference,
}

impl Side {
    fn decoder_prefix(self) -> &'static str {
        match self {
            Side::Vendor => "mcapi ",
            Side::Reference => "",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Vendor => f.write_str("vendor"),
            Side::Reference => f.write_str("reference"),
        }
    }
}

/// Why a single check did not pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckFailure {
    /// Both sides produced a digest or tag but the bytes differ
    #[error("{label} final memcmp failed")]
    DigestMismatch { label: &'static str },

    /// A provider call returned an error instead of output
    #[error("{label} {side} call failed: {source}")]
    Provider {
        label: &'static str,
        side: Side,
        #[source]
        source: ApiError,
    },

    /// Compressors disagree on the return value, or one of them failed
    #[error("compress {mode} ret failed")]
    CompressReturn {
        mode: CompressMode,
        vendor: CodecResult,
        reference: CodecResult,
    },

    /// Equal lengths but different compressed bytes
    #[error("compress {mode} cmp failed")]
    CompressedBytesMismatch { mode: CompressMode },

    /// A decoder did not reproduce the original text
    #[error("{}decompress {mode} cmp failed", .decoder.decoder_prefix())]
    RoundTrip {
        mode: CompressMode,
        decoder: Side,
        returned: CodecResult,
    },
}

/// Outcome of a whole run that did not pass
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Fixtures could not be prepared; no check ran
    #[error("mcapi {what} failed")]
    Setup {
        what: &'static str,
        #[source]
        source: SetupError,
    },

    /// The named check failed; later checks were not run
    #[error("mcapi check_{check} failed")]
    Check {
        check: &'static str,
        #[source]
        failure: CheckFailure,
    },
}

impl HarnessError {
    /// The failing check, if the run got that far
    pub fn failure(&self) -> Option<&CheckFailure> {
        match self {
            HarnessError::Check { failure, .. } => Some(failure),
            HarnessError::Setup { .. } => None,
        }
    }
}

/// Reasons fixture setup can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// The allocator could not provide a buffer
    #[error("could not allocate {capacity} bytes for the {purpose}")]
    Alloc {
        capacity: usize,
        purpose: crate::fixtures::AllocPurpose,
    },

    /// The configuration cannot produce a valid run
    #[error("invalid configuration: {0}")]
    Config(&'static str),
}

/// Result of a single check
pub type CheckResult = Result<(), CheckFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_match_report_format() {
        let digest = CheckFailure::DigestMismatch { label: "hmac sha256" };
        assert_eq!(digest.to_string(), "hmac sha256 final memcmp failed");

        let ret = CheckFailure::CompressReturn {
            mode: CompressMode::Dynamic,
            vendor: Ok(10),
            reference: Ok(11),
        };
        assert_eq!(ret.to_string(), "compress dynamic ret failed");

        let vendor = CheckFailure::RoundTrip {
            mode: CompressMode::Static,
            decoder: Side::Vendor,
            returned: Ok(3),
        };
        assert_eq!(vendor.to_string(), "mcapi decompress static cmp failed");

        let reference = CheckFailure::RoundTrip {
            mode: CompressMode::Static,
            decoder: Side::Reference,
            returned: Ok(3),
        };
        assert_eq!(reference.to_string(), "decompress static cmp failed");
    }

    #[test]
    fn harness_error_names_the_check() {
        let err = HarnessError::Check {
            check: "compress",
            failure: CheckFailure::CompressedBytesMismatch {
                mode: CompressMode::Static,
            },
        };
        assert_eq!(err.to_string(), "mcapi check_compress failed");
        assert!(err.failure().is_some());

        let setup = HarnessError::Setup {
            what: "key alloc",
            source: SetupError::Config("empty data"),
        };
        assert_eq!(setup.to_string(), "mcapi key alloc failed");
    }
}
