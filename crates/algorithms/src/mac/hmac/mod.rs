//! HMAC (Hash-based Message Authentication Code)
//!
//! RFC 2104 / FIPS 198-1. Key-dependent pads live in fixed stack buffers
//! sized for the largest supported block (SHA-512, 128 bytes) and are wiped
//! on drop.
//!
//! Finalizing returns the tag and re-arms the instance with the same key,
//! so one keyed context can authenticate several messages in turn.

use crate::error::{validate, Result};
use crate::hash::HashFunction;
use mcapi_params::hash::MAX_BLOCK_SIZE;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

const MAX_BLOCK: usize = MAX_BLOCK_SIZE;

/// Keyed HMAC state over the hash function `H`
#[derive(Clone)]
pub struct Hmac<H: HashFunction + Clone> {
    hash: H,
    ipad: [u8; MAX_BLOCK],
    opad: [u8; MAX_BLOCK],
    block_size: usize,
}

impl<H: HashFunction + Clone> Drop for Hmac<H> {
    fn drop(&mut self) {
        self.ipad.zeroize();
        self.opad.zeroize();
    }
}

impl<H> Hmac<H>
where
    H: HashFunction + Clone,
{
    const IPAD_BYTE: u8 = 0x36;
    const OPAD_BYTE: u8 = 0x5c;

    /// Create a new HMAC instance from `key`.
    ///
    /// Keys longer than the block size are hashed first; shorter keys are
    /// zero-padded.
    pub fn new(key: &[u8]) -> Result<Self> {
        let bs = H::block_size();
        validate::max_length("HMAC block size", bs, MAX_BLOCK)?;

        // Hash the key unconditionally so the running time
        // depends only on the public key length.
        let hashed = H::digest(key)?;

        let mut k_prime = [0u8; MAX_BLOCK];
        let long = (key.len() > bs) as u8;
        let mask = long.wrapping_neg();
        for (i, kp) in k_prime.iter_mut().enumerate().take(bs) {
            let k = key.get(i).copied().unwrap_or(0);
            let hk = hashed.as_ref().get(i).copied().unwrap_or(0);
            *kp = (hk & mask) | (k & !mask);
        }

        let mut ipad = [0u8; MAX_BLOCK];
        let mut opad = [0u8; MAX_BLOCK];
        for i in 0..bs {
            ipad[i] = k_prime[i] ^ Self::IPAD_BYTE;
            opad[i] = k_prime[i] ^ Self::OPAD_BYTE;
        }
        k_prime.zeroize();

        let mut hash = H::new();
        hash.update(&ipad[..bs])?;

        Ok(Self {
            hash,
            ipad,
            opad,
            block_size: bs,
        })
    }

    /// Feed additional `data` into the MAC.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        self.hash.update(data).map(|_| ())
    }

    /// Finalise and return the tag, then restart with the same key.
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        let inner_hash = self.hash.finalize()?;

        let mut outer = H::new();
        outer.update(&self.opad[..self.block_size])?;
        outer.update(inner_hash.as_ref())?;
        let tag = outer.finalize()?.as_ref().to_vec();

        self.hash.update(&self.ipad[..self.block_size])?;
        Ok(tag)
    }

    /// Tag length in bytes
    pub fn output_size() -> usize {
        H::output_size()
    }

    /// One-shot MAC helper.
    pub fn mac(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let mut h = Self::new(key)?;
        h.update(data)?;
        h.finalize()
    }

    /// Constant-time verification of `tag` against `key` / `data`.
    pub fn verify(key: &[u8], data: &[u8], tag: &[u8]) -> Result<bool> {
        let expected = Self::mac(key, data)?;

        // Iterate over the public digest length regardless of the tag length.
        let mut diff = 0u8;
        for i in 0..H::output_size() {
            let a = expected.get(i).copied().unwrap_or(0);
            let b = tag.get(i).copied().unwrap_or(0);
            diff |= a ^ b;
        }
        diff |= ((tag.len() ^ H::output_size()) != 0) as u8;

        Ok(diff.ct_eq(&0u8).unwrap_u8() == 1)
    }
}
