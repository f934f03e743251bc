//! Streaming hash contexts
//!
//! Each context follows the C lifecycle: `initialize`, any number of
//! `data_add` calls, then `finalize` into a caller buffer. A finalized
//! context is back in its initial state and may be reused.

use mcapi_algorithms::hash::{HashFunction, Md5, Sha1, Sha256, Sha384, Sha512};
use mcapi_api::{Error, Result};
use mcapi_params::hash::{
    MD5_OUTPUT_SIZE, SHA1_OUTPUT_SIZE, SHA256_OUTPUT_SIZE, SHA384_OUTPUT_SIZE,
    SHA512_OUTPUT_SIZE,
};

macro_rules! impl_hash_ctx {
    ($(#[$doc:meta])* $name:ident, $inner:ty, $size:expr) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            inner: $inner,
        }

        impl $name {
            /// Digest length in bytes
            pub const DIGEST_SIZE: usize = $size;

            /// A context ready to absorb data
            pub fn new() -> Self {
                Self {
                    inner: <$inner as HashFunction>::new(),
                }
            }

            /// Discard any absorbed data
            pub fn initialize(&mut self) {
                self.inner = <$inner as HashFunction>::new();
            }

            /// Absorb `data`
            pub fn data_add(&mut self, data: &[u8]) -> Result<()> {
                self.inner.update(data)?;
                Ok(())
            }

            /// Write the digest into the first `DIGEST_SIZE` bytes of `out`
            /// and re-initialize the context.
            pub fn finalize(&mut self, out: &mut [u8]) -> Result<()> {
                if out.len() < Self::DIGEST_SIZE {
                    return Err(Error::InvalidLength {
                        context: stringify!($name),
                        expected: Self::DIGEST_SIZE,
                        actual: out.len(),
                    });
                }
                let digest = self.inner.finalize()?;
                digest.copy_into(&mut out[..Self::DIGEST_SIZE])?;
                Ok(())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

impl_hash_ctx!(
    /// MD5 context
    Md5Ctx,
    Md5,
    MD5_OUTPUT_SIZE
);
impl_hash_ctx!(
    /// SHA-1 context
    ShaCtx,
    Sha1,
    SHA1_OUTPUT_SIZE
);
impl_hash_ctx!(
    /// SHA-256 context
    Sha256Ctx,
    Sha256,
    SHA256_OUTPUT_SIZE
);
impl_hash_ctx!(
    /// SHA-384 context
    Sha384Ctx,
    Sha384,
    SHA384_OUTPUT_SIZE
);
impl_hash_ctx!(
    /// SHA-512 context
    Sha512Ctx,
    Sha512,
    SHA512_OUTPUT_SIZE
);
