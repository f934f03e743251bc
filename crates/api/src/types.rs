//! Algorithm and mode selectors
//!
//! Small tagged enums stand in for per-call-site buffer sizing: every size
//! the harness needs is looked up here and passed explicitly.

use core::fmt;

use mcapi_params::codec::{COMPRESS_DYNAMIC, COMPRESS_FIXED};
use mcapi_params::hash::{
    MD5_BLOCK_SIZE, MD5_OUTPUT_SIZE, SHA1_BLOCK_SIZE, SHA1_OUTPUT_SIZE, SHA256_BLOCK_SIZE,
    SHA256_OUTPUT_SIZE, SHA384_OUTPUT_SIZE, SHA512_BLOCK_SIZE, SHA512_OUTPUT_SIZE,
};

/// Hash primitives covered by the capability surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// MD5 (RFC 1321)
    Md5,
    /// SHA-1 (FIPS 180-4)
    Sha1,
    /// SHA-256 (FIPS 180-4)
    Sha256,
    /// SHA-384 (FIPS 180-4)
    Sha384,
    /// SHA-512 (FIPS 180-4)
    Sha512,
}

impl HashAlgorithm {
    /// Every hash, in increasing digest width
    pub const ALL: [HashAlgorithm; 5] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    /// Digest length in bytes
    pub const fn digest_size(self) -> usize {
        match self {
            HashAlgorithm::Md5 => MD5_OUTPUT_SIZE,
            HashAlgorithm::Sha1 => SHA1_OUTPUT_SIZE,
            HashAlgorithm::Sha256 => SHA256_OUTPUT_SIZE,
            HashAlgorithm::Sha384 => SHA384_OUTPUT_SIZE,
            HashAlgorithm::Sha512 => SHA512_OUTPUT_SIZE,
        }
    }

    /// Compression function block length in bytes
    pub const fn block_size(self) -> usize {
        match self {
            HashAlgorithm::Md5 => MD5_BLOCK_SIZE,
            HashAlgorithm::Sha1 => SHA1_BLOCK_SIZE,
            HashAlgorithm::Sha256 => SHA256_BLOCK_SIZE,
            HashAlgorithm::Sha384 | HashAlgorithm::Sha512 => SHA512_BLOCK_SIZE,
        }
    }

    /// Short lowercase label used in harness output (`"sha"` for SHA-1)
    pub const fn label(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Standard algorithm name
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hashes usable as the HMAC underlying function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HmacAlgorithm {
    /// HMAC-SHA-1
    Sha1,
    /// HMAC-SHA-256
    Sha256,
    /// HMAC-SHA-384
    Sha384,
    /// HMAC-SHA-512
    Sha512,
}

impl HmacAlgorithm {
    /// Every HMAC variant, in increasing digest width
    pub const ALL: [HmacAlgorithm; 4] = [
        HmacAlgorithm::Sha1,
        HmacAlgorithm::Sha256,
        HmacAlgorithm::Sha384,
        HmacAlgorithm::Sha512,
    ];

    /// The underlying hash
    pub const fn hash(self) -> HashAlgorithm {
        match self {
            HmacAlgorithm::Sha1 => HashAlgorithm::Sha1,
            HmacAlgorithm::Sha256 => HashAlgorithm::Sha256,
            HmacAlgorithm::Sha384 => HashAlgorithm::Sha384,
            HmacAlgorithm::Sha512 => HashAlgorithm::Sha512,
        }
    }

    /// Tag length in bytes (the underlying digest length)
    pub const fn digest_size(self) -> usize {
        self.hash().digest_size()
    }

    /// Harness label, e.g. `"hmac sha256"`
    pub const fn label(self) -> &'static str {
        match self {
            HmacAlgorithm::Sha1 => "hmac sha",
            HmacAlgorithm::Sha256 => "hmac sha256",
            HmacAlgorithm::Sha384 => "hmac sha384",
            HmacAlgorithm::Sha512 => "hmac sha512",
        }
    }
}

impl fmt::Display for HmacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HMAC-{}", self.hash().name())
    }
}

/// Opaque coding-table selector for the Huffman codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressMode {
    /// Per-block dynamic Huffman tables
    Dynamic,
    /// The fixed table from RFC 1951
    Static,
}

impl CompressMode {
    /// Both modes, in the order the harness runs them
    pub const ALL: [CompressMode; 2] = [CompressMode::Dynamic, CompressMode::Static];

    /// The raw flag word passed to the codec
    pub const fn flags(self) -> u32 {
        match self {
            CompressMode::Dynamic => COMPRESS_DYNAMIC,
            CompressMode::Static => COMPRESS_FIXED,
        }
    }

    /// Harness label
    pub const fn label(self) -> &'static str {
        match self {
            CompressMode::Dynamic => "dynamic",
            CompressMode::Static => "static",
        }
    }
}

impl fmt::Display for CompressMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_sizes_increase() {
        let sizes: Vec<usize> = HashAlgorithm::ALL.iter().map(|a| a.digest_size()).collect();
        assert_eq!(sizes, vec![16, 20, 32, 48, 64]);
    }

    #[test]
    fn hmac_sizes_follow_underlying_hash() {
        for alg in HmacAlgorithm::ALL {
            assert_eq!(alg.digest_size(), alg.hash().digest_size());
        }
    }

    #[test]
    fn mode_flags() {
        assert_eq!(CompressMode::Dynamic.flags(), 0);
        assert_eq!(CompressMode::Static.flags(), 1);
    }
}
