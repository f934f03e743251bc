//! Per-primitive checks
//!
//! Each check drives both providers through the same call sequence and
//! compares the outputs byte for byte. A check returns at the first
//! difference.

pub mod compress;
pub mod digest;
pub mod hmac;

use std::fmt;

use mcapi_api::HashAlgorithm;

/// A named unit of the suite, reported as `mcapi check_<name> failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckGroup {
    /// One digest comparison
    Hash(HashAlgorithm),
    /// All four HMAC sub-cases
    Hmac,
    /// Dynamic and static Huffman round trips
    Compress,
}

impl CheckGroup {
    /// Every group, in run order
    pub const ALL: [CheckGroup; 7] = [
        CheckGroup::Hash(HashAlgorithm::Md5),
        CheckGroup::Hash(HashAlgorithm::Sha1),
        CheckGroup::Hash(HashAlgorithm::Sha256),
        CheckGroup::Hash(HashAlgorithm::Sha384),
        CheckGroup::Hash(HashAlgorithm::Sha512),
        CheckGroup::Hmac,
        CheckGroup::Compress,
    ];

    /// Suffix of the `check_` trailer
    pub fn name(self) -> &'static str {
        match self {
            CheckGroup::Hash(alg) => alg.label(),
            CheckGroup::Hmac => "hmac",
            CheckGroup::Compress => "compress",
        }
    }
}

impl fmt::Display for CheckGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Label printed when the compression check passes
pub const HUFFMAN_LABEL: &str = "huffman";
