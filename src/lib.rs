//! # mcapi
//!
//! A C-API-shaped layer over the mcapi primitives: streaming hash contexts
//! (MD5, SHA-1, SHA-256, SHA-384, SHA-512), a keyed HMAC context, and a
//! buffer-to-buffer Huffman codec that reports results as C-style return
//! codes.
//!
//! ```
//! use mcapi::Sha256Ctx;
//!
//! let mut ctx = Sha256Ctx::new();
//! ctx.data_add(b"abc").unwrap();
//! let mut digest = [0u8; Sha256Ctx::DIGEST_SIZE];
//! ctx.finalize(&mut digest).unwrap();
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports its sub-crates:
//!
//! - [`mcapi-api`]: capability traits and the shared error type
//! - [`mcapi-params`]: sizes, codec flags and return codes
//! - [`mcapi-algorithms`]: the hash, HMAC and codec primitives

#![forbid(unsafe_code)]

pub use mcapi_algorithms as algorithms;
pub use mcapi_api as api;
pub use mcapi_params as params;

pub mod compress;
pub mod hash;
pub mod hmac;

pub use compress::{huffman_compress, huffman_decompress};
pub use hash::{Md5Ctx, Sha256Ctx, Sha384Ctx, Sha512Ctx, ShaCtx};
pub use hmac::{HmacCtx, HmacType};
pub use params::codec::{
    BAD_FUNC_ARG, BUFFER_E, COMPRESS_DYNAMIC, COMPRESS_E, COMPRESS_FIXED, DECOMPRESS_E,
};

/// Common imports for mcapi users
pub mod prelude {
    pub use crate::api::{Error, Result};
    pub use crate::compress::{huffman_compress, huffman_decompress};
    pub use crate::hash::{Md5Ctx, Sha256Ctx, Sha384Ctx, Sha512Ctx, ShaCtx};
    pub use crate::hmac::{HmacCtx, HmacType};
}
