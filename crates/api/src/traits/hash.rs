//! Streaming hash capability

use crate::error::Result;
use crate::types::HashAlgorithm;

/// One hash computation following the initialize → update → finalize protocol.
pub trait HashContext {
    /// Which primitive this context computes
    fn algorithm(&self) -> HashAlgorithm;

    /// Reset the context to the algorithm's initial state
    fn initialize(&mut self) -> Result<()>;

    /// Absorb `data`
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Write the digest into `out`.
    ///
    /// `out` must be exactly [`HashAlgorithm::digest_size`] bytes long.
    fn finalize(&mut self, out: &mut [u8]) -> Result<()>;
}
