//! The trusted oracle: RustCrypto hashes and HMAC, and `miniz_oxide`'s
//! callback and slice-iterator front-ends for the codec.

use hmac::{Hmac, Mac};
use md5::Md5;
use miniz_oxide::deflate::core::{
    compress_to_output, create_comp_flags_from_zip_params, CompressionStrategy, CompressorOxide,
    TDEFLFlush, TDEFLStatus,
};
use miniz_oxide::inflate::{decompress_slice_iter_to_slice, TINFLStatus};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use tracing::trace;

use mcapi_api::{
    CodecError, CodecResult, CompressMode, CryptoProvider, Error, HashAlgorithm, HashContext,
    HmacAlgorithm, HmacContext, Result,
};
use mcapi_params::codec::{
    BAD_FUNC_ARG, BUFFER_E, COMPRESS_E, COMPRESS_LEVEL, COMPRESS_WINDOW_BITS, DECOMPRESS_E,
};

use super::{exact_output, unkeyed};

/// RustCrypto and `miniz_oxide`
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceProvider;

/// A RustCrypto digest behind the harness hash protocol
pub struct RustCryptoHash<D> {
    algorithm: HashAlgorithm,
    inner: D,
}

impl<D: Digest> RustCryptoHash<D> {
    fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            inner: D::new(),
        }
    }
}

impl<D: Digest> HashContext for RustCryptoHash<D> {
    fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    fn initialize(&mut self) -> Result<()> {
        self.inner = D::new();
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        Digest::update(&mut self.inner, data);
        Ok(())
    }

    fn finalize(&mut self, out: &mut [u8]) -> Result<()> {
        exact_output("reference digest", out, self.algorithm.digest_size())?;
        let digest = std::mem::replace(&mut self.inner, D::new()).finalize();
        out.copy_from_slice(&digest);
        Ok(())
    }
}

enum Keyed {
    Unkeyed,
    Sha1(Hmac<Sha1>),
    Sha256(Hmac<Sha256>),
    Sha384(Hmac<Sha384>),
    Sha512(Hmac<Sha512>),
}

/// RustCrypto HMAC, keyed on demand. Finalizing consumes the key.
pub struct RustCryptoHmac {
    state: Keyed,
}

fn keyed<M: Mac + hmac::digest::KeyInit>(key: &[u8]) -> Result<M> {
    <M as Mac>::new_from_slice(key).map_err(|_| Error::InvalidParameter {
        context: "reference hmac key",
        message: "rejected by the MAC".into(),
    })
}

impl HmacContext for RustCryptoHmac {
    fn set_key(&mut self, algorithm: HmacAlgorithm, key: &[u8]) -> Result<()> {
        self.state = Keyed::Unkeyed;
        self.state = match algorithm {
            HmacAlgorithm::Sha1 => Keyed::Sha1(keyed(key)?),
            HmacAlgorithm::Sha256 => Keyed::Sha256(keyed(key)?),
            HmacAlgorithm::Sha384 => Keyed::Sha384(keyed(key)?),
            HmacAlgorithm::Sha512 => Keyed::Sha512(keyed(key)?),
        };
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        match &mut self.state {
            Keyed::Unkeyed => return Err(unkeyed("reference hmac")),
            Keyed::Sha1(m) => Mac::update(m, data),
            Keyed::Sha256(m) => Mac::update(m, data),
            Keyed::Sha384(m) => Mac::update(m, data),
            Keyed::Sha512(m) => Mac::update(m, data),
        }
        Ok(())
    }

    fn finalize(&mut self, out: &mut [u8]) -> Result<()> {
        let tag = match std::mem::replace(&mut self.state, Keyed::Unkeyed) {
            Keyed::Unkeyed => return Err(unkeyed("reference hmac")),
            Keyed::Sha1(m) => m.finalize().into_bytes().to_vec(),
            Keyed::Sha256(m) => m.finalize().into_bytes().to_vec(),
            Keyed::Sha384(m) => m.finalize().into_bytes().to_vec(),
            Keyed::Sha512(m) => m.finalize().into_bytes().to_vec(),
        };
        exact_output("reference hmac tag", out, tag.len())?;
        out.copy_from_slice(&tag);
        Ok(())
    }
}

impl CryptoProvider for ReferenceProvider {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn hash(&self, algorithm: HashAlgorithm) -> Box<dyn HashContext> {
        match algorithm {
            HashAlgorithm::Md5 => Box::new(RustCryptoHash::<Md5>::new(algorithm)),
            HashAlgorithm::Sha1 => Box::new(RustCryptoHash::<Sha1>::new(algorithm)),
            HashAlgorithm::Sha256 => Box::new(RustCryptoHash::<Sha256>::new(algorithm)),
            HashAlgorithm::Sha384 => Box::new(RustCryptoHash::<Sha384>::new(algorithm)),
            HashAlgorithm::Sha512 => Box::new(RustCryptoHash::<Sha512>::new(algorithm)),
        }
    }

    fn hmac(&self) -> Box<dyn HmacContext> {
        Box::new(RustCryptoHmac {
            state: Keyed::Unkeyed,
        })
    }

    fn compress(&self, out: &mut [u8], input: &[u8], mode: CompressMode) -> CodecResult {
        if input.is_empty() || out.is_empty() {
            return Err(CodecError { code: BAD_FUNC_ARG });
        }
        let strategy = match mode {
            CompressMode::Dynamic => CompressionStrategy::Default,
            CompressMode::Static => CompressionStrategy::Fixed,
        };
        let flags =
            create_comp_flags_from_zip_params(COMPRESS_LEVEL, COMPRESS_WINDOW_BITS, strategy as i32);
        let mut compressor = CompressorOxide::new(flags);

        let mut stream = Vec::with_capacity(out.len());
        let (status, consumed) = compress_to_output(&mut compressor, input, TDEFLFlush::Finish, |chunk| {
            stream.extend_from_slice(chunk);
            true
        });
        trace!(?status, consumed, len = stream.len(), "reference deflate");

        if status != TDEFLStatus::Done || consumed != input.len() {
            return Err(CodecError { code: COMPRESS_E });
        }
        let dest = out
            .get_mut(..stream.len())
            .ok_or(CodecError { code: BUFFER_E })?;
        dest.copy_from_slice(&stream);
        Ok(stream.len())
    }

    fn decompress(&self, out: &mut [u8], input: &[u8]) -> CodecResult {
        if input.is_empty() || out.is_empty() {
            return Err(CodecError { code: BAD_FUNC_ARG });
        }
        decompress_slice_iter_to_slice(out, std::iter::once(input), true, false).map_err(
            |status| match status {
                TINFLStatus::HasMoreOutput => CodecError { code: BUFFER_E },
                _ => CodecError { code: DECOMPRESS_E },
            },
        )
    }
}
