//! Adapter from the C-shaped `mcapi` API to the provider traits

use mcapi::{
    huffman_compress, huffman_decompress, HmacCtx, HmacType, Md5Ctx, Sha256Ctx, Sha384Ctx,
    Sha512Ctx, ShaCtx,
};
use mcapi_api::{
    codec_result, CodecResult, CompressMode, CryptoProvider, HashAlgorithm, HashContext,
    HmacAlgorithm, HmacContext, Result,
};

use super::{exact_output, unkeyed};

/// The API under test
#[derive(Debug, Default, Clone, Copy)]
pub struct VendorProvider;

enum VendorCtx {
    Md5(Md5Ctx),
    Sha(ShaCtx),
    Sha256(Sha256Ctx),
    Sha384(Sha384Ctx),
    Sha512(Sha512Ctx),
}

/// One vendor hash context
pub struct VendorHash {
    algorithm: HashAlgorithm,
    ctx: VendorCtx,
}

impl VendorHash {
    fn new(algorithm: HashAlgorithm) -> Self {
        let ctx = match algorithm {
            HashAlgorithm::Md5 => VendorCtx::Md5(Md5Ctx::new()),
            HashAlgorithm::Sha1 => VendorCtx::Sha(ShaCtx::new()),
            HashAlgorithm::Sha256 => VendorCtx::Sha256(Sha256Ctx::new()),
            HashAlgorithm::Sha384 => VendorCtx::Sha384(Sha384Ctx::new()),
            HashAlgorithm::Sha512 => VendorCtx::Sha512(Sha512Ctx::new()),
        };
        Self { algorithm, ctx }
    }
}

impl HashContext for VendorHash {
    fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    fn initialize(&mut self) -> Result<()> {
        match &mut self.ctx {
            VendorCtx::Md5(c) => c.initialize(),
            VendorCtx::Sha(c) => c.initialize(),
            VendorCtx::Sha256(c) => c.initialize(),
            VendorCtx::Sha384(c) => c.initialize(),
            VendorCtx::Sha512(c) => c.initialize(),
        }
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        match &mut self.ctx {
            VendorCtx::Md5(c) => c.data_add(data),
            VendorCtx::Sha(c) => c.data_add(data),
            VendorCtx::Sha256(c) => c.data_add(data),
            VendorCtx::Sha384(c) => c.data_add(data),
            VendorCtx::Sha512(c) => c.data_add(data),
        }
    }

    fn finalize(&mut self, out: &mut [u8]) -> Result<()> {
        exact_output("vendor digest", out, self.algorithm.digest_size())?;
        match &mut self.ctx {
            VendorCtx::Md5(c) => c.finalize(out),
            VendorCtx::Sha(c) => c.finalize(out),
            VendorCtx::Sha256(c) => c.finalize(out),
            VendorCtx::Sha384(c) => c.finalize(out),
            VendorCtx::Sha512(c) => c.finalize(out),
        }
    }
}

/// The vendor HMAC context, keyed on demand
#[derive(Default)]
pub struct VendorHmac {
    algorithm: Option<HmacAlgorithm>,
    ctx: HmacCtx,
}

fn hmac_type(algorithm: HmacAlgorithm) -> HmacType {
    match algorithm {
        HmacAlgorithm::Sha1 => HmacType::Sha,
        HmacAlgorithm::Sha256 => HmacType::Sha256,
        HmacAlgorithm::Sha384 => HmacType::Sha384,
        HmacAlgorithm::Sha512 => HmacType::Sha512,
    }
}

impl HmacContext for VendorHmac {
    fn set_key(&mut self, algorithm: HmacAlgorithm, key: &[u8]) -> Result<()> {
        self.algorithm = None;
        self.ctx
            .set_key(hmac_type(algorithm), key)
            .map_err(|e| e.with_context("vendor hmac key"))?;
        self.algorithm = Some(algorithm);
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.ctx.data_add(data)
    }

    fn finalize(&mut self, out: &mut [u8]) -> Result<()> {
        let algorithm = self.algorithm.ok_or_else(|| unkeyed("vendor hmac"))?;
        exact_output("vendor hmac tag", out, algorithm.digest_size())?;
        self.ctx.finalize(out)
    }
}

impl CryptoProvider for VendorProvider {
    fn name(&self) -> &'static str {
        "mcapi"
    }

    fn hash(&self, algorithm: HashAlgorithm) -> Box<dyn HashContext> {
        Box::new(VendorHash::new(algorithm))
    }

    fn hmac(&self) -> Box<dyn HmacContext> {
        Box::new(VendorHmac::default())
    }

    fn compress(&self, out: &mut [u8], input: &[u8], mode: CompressMode) -> CodecResult {
        codec_result(huffman_compress(out, input, mode.flags()))
    }

    fn decompress(&self, out: &mut [u8], input: &[u8]) -> CodecResult {
        codec_result(huffman_decompress(out, input))
    }
}
