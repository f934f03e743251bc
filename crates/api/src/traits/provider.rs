//! Provider capability: one implementation of every primitive

use crate::error::CodecResult;
use crate::traits::{HashContext, HmacContext};
use crate::types::{CompressMode, HashAlgorithm};

/// A complete implementation of the primitive suite.
///
/// The harness holds two of these (vendor and reference) and never looks
/// behind the trait.
pub trait CryptoProvider {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// A fresh, not yet initialized, context for `algorithm`
    fn hash(&self, algorithm: HashAlgorithm) -> Box<dyn HashContext>;

    /// A fresh, unkeyed HMAC context
    fn hmac(&self) -> Box<dyn HmacContext>;

    /// Compress `input` into `out` and return the number of bytes written
    fn compress(&self, out: &mut [u8], input: &[u8], mode: CompressMode) -> CodecResult;

    /// Decompress `input` into `out` and return the number of bytes written
    fn decompress(&self, out: &mut [u8], input: &[u8]) -> CodecResult;
}
