//! Keyed HMAC capability

use crate::error::Result;
use crate::types::HmacAlgorithm;

/// An HMAC context that is (re-)keyed before every computation.
pub trait HmacContext {
    /// Select the underlying hash and install `key`, discarding any prior state
    fn set_key(&mut self, algorithm: HmacAlgorithm, key: &[u8]) -> Result<()>;

    /// Absorb `data`; fails if no key has been set
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Write the tag into `out`, which must match the underlying digest size
    fn finalize(&mut self, out: &mut [u8]) -> Result<()>;
}
