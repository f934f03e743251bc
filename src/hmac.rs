//! Keyed HMAC context
//!
//! The hash is chosen when the key is installed, as with the C API's
//! `HmacSetKey(ctx, type, key, len)`.

use core::fmt;

use mcapi_algorithms::hash::{Sha1, Sha256, Sha384, Sha512};
use mcapi_algorithms::Hmac;
use mcapi_api::{Error, Result};
use mcapi_params::hash::{
    SHA1_OUTPUT_SIZE, SHA256_OUTPUT_SIZE, SHA384_OUTPUT_SIZE, SHA512_OUTPUT_SIZE,
};
use zeroize::Zeroize;

/// Hash underneath an HMAC context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HmacType {
    /// SHA-1
    Sha,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HmacType {
    /// Tag length in bytes
    pub fn digest_size(self) -> usize {
        match self {
            HmacType::Sha => SHA1_OUTPUT_SIZE,
            HmacType::Sha256 => SHA256_OUTPUT_SIZE,
            HmacType::Sha384 => SHA384_OUTPUT_SIZE,
            HmacType::Sha512 => SHA512_OUTPUT_SIZE,
        }
    }
}

impl fmt::Display for HmacType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HmacType::Sha => "HMAC-SHA-1",
            HmacType::Sha256 => "HMAC-SHA-256",
            HmacType::Sha384 => "HMAC-SHA-384",
            HmacType::Sha512 => "HMAC-SHA-512",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
enum Keyed {
    Unkeyed,
    Sha(Hmac<Sha1>),
    Sha256(Hmac<Sha256>),
    Sha384(Hmac<Sha384>),
    Sha512(Hmac<Sha512>),
}

/// HMAC context
#[derive(Clone)]
pub struct HmacCtx {
    state: Keyed,
}

impl HmacCtx {
    /// An unkeyed context; call [`set_key`](Self::set_key) before use
    pub fn new() -> Self {
        Self {
            state: Keyed::Unkeyed,
        }
    }

    /// Hash selected by the last successful `set_key`, if any
    pub fn hmac_type(&self) -> Option<HmacType> {
        match self.state {
            Keyed::Unkeyed => None,
            Keyed::Sha(_) => Some(HmacType::Sha),
            Keyed::Sha256(_) => Some(HmacType::Sha256),
            Keyed::Sha384(_) => Some(HmacType::Sha384),
            Keyed::Sha512(_) => Some(HmacType::Sha512),
        }
    }

    /// Select the hash and install `key`, discarding any previous state
    pub fn set_key(&mut self, hmac_type: HmacType, key: &[u8]) -> Result<()> {
        self.state = match hmac_type {
            HmacType::Sha => Keyed::Sha(Hmac::new(key)?),
            HmacType::Sha256 => Keyed::Sha256(Hmac::new(key)?),
            HmacType::Sha384 => Keyed::Sha384(Hmac::new(key)?),
            HmacType::Sha512 => Keyed::Sha512(Hmac::new(key)?),
        };
        Ok(())
    }

    /// Absorb `data`
    pub fn data_add(&mut self, data: &[u8]) -> Result<()> {
        match &mut self.state {
            Keyed::Unkeyed => return Err(unkeyed("HmacCtx::data_add")),
            Keyed::Sha(h) => h.update(data)?,
            Keyed::Sha256(h) => h.update(data)?,
            Keyed::Sha384(h) => h.update(data)?,
            Keyed::Sha512(h) => h.update(data)?,
        }
        Ok(())
    }

    /// Write the tag into the first `digest_size` bytes of `out`.
    ///
    /// The key stays installed, so the context can authenticate another
    /// message straight away.
    pub fn finalize(&mut self, out: &mut [u8]) -> Result<()> {
        let size = self
            .hmac_type()
            .ok_or_else(|| unkeyed("HmacCtx::finalize"))?
            .digest_size();
        if out.len() < size {
            return Err(Error::InvalidLength {
                context: "HmacCtx::finalize",
                expected: size,
                actual: out.len(),
            });
        }

        let mut tag = match &mut self.state {
            Keyed::Unkeyed => return Err(unkeyed("HmacCtx::finalize")),
            Keyed::Sha(h) => h.finalize()?,
            Keyed::Sha256(h) => h.finalize()?,
            Keyed::Sha384(h) => h.finalize()?,
            Keyed::Sha512(h) => h.finalize()?,
        };
        out[..size].copy_from_slice(&tag);
        tag.zeroize();
        Ok(())
    }
}

impl Default for HmacCtx {
    fn default() -> Self {
        Self::new()
    }
}

fn unkeyed(context: &'static str) -> Error {
    Error::InvalidState {
        context,
        message: "no key has been set".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_before_set_key_is_invalid_state() {
        let mut ctx = HmacCtx::new();
        assert!(matches!(
            ctx.data_add(b"data"),
            Err(Error::InvalidState { .. })
        ));
        let mut out = [0u8; 64];
        assert!(matches!(
            ctx.finalize(&mut out),
            Err(Error::InvalidState { .. })
        ));
    }

    #[test]
    fn rfc4231_case_two() {
        let mut ctx = HmacCtx::new();
        ctx.set_key(HmacType::Sha256, b"Jefe").unwrap();
        ctx.data_add(b"what do ya want ").unwrap();
        ctx.data_add(b"for nothing?").unwrap();

        let mut out = [0u8; 32];
        ctx.finalize(&mut out).unwrap();
        assert_eq!(
            hex::encode(out),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn set_key_switches_hash() {
        let mut ctx = HmacCtx::new();
        ctx.set_key(HmacType::Sha512, b"Jefe").unwrap();
        ctx.data_add(b"leftover").unwrap();
        ctx.set_key(HmacType::Sha, b"Jefe").unwrap();
        assert_eq!(ctx.hmac_type(), Some(HmacType::Sha));

        ctx.data_add(b"what do ya want for nothing?").unwrap();
        let mut out = [0u8; 20];
        ctx.finalize(&mut out).unwrap();
        assert_eq!(
            hex::encode(out),
            "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"
        );
    }

    #[test]
    fn finalize_rejects_short_buffer() {
        let mut ctx = HmacCtx::new();
        ctx.set_key(HmacType::Sha384, b"Jefe").unwrap();
        let mut out = [0u8; 32];
        assert!(matches!(
            ctx.finalize(&mut out),
            Err(Error::InvalidLength {
                expected: 48,
                actual: 32,
                ..
            })
        ));
    }
}
