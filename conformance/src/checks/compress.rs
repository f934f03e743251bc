//! Huffman codec equivalence and round trips
//!
//! For each mode both compressors must return the same non-negative length
//! and the same bytes. The vendor stream must then decode back to the text
//! through both decoders.

use mcapi_api::{CodecResult, CompressMode, CryptoProvider};
use tracing::{debug, error};

use crate::compare::compare;
use crate::error::{CheckFailure, CheckResult, Side};

/// The two scratch buffers one mode works in
#[derive(Debug)]
pub struct CompressionBuffers {
    compressed: Vec<u8>,
    scratch: Vec<u8>,
}

impl CompressionBuffers {
    /// Two zeroed buffers of `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            compressed: vec![0u8; capacity],
            scratch: vec![0u8; capacity],
        }
    }

    /// Zero both buffers before reuse
    pub fn reset(&mut self) {
        self.compressed.fill(0);
        self.scratch.fill(0);
    }
}

/// Run one mode: compress on both sides, compare, decode with both decoders
pub fn check_mode(
    vendor: &dyn CryptoProvider,
    reference: &dyn CryptoProvider,
    mode: CompressMode,
    text: &[u8],
    buffers: &mut CompressionBuffers,
) -> CheckResult {
    buffers.reset();
    let CompressionBuffers {
        compressed,
        scratch,
    } = buffers;

    let vendor_ret = vendor.compress(compressed, text, mode);
    let reference_ret = reference.compress(scratch, text, mode);

    let len = match (vendor_ret, reference_ret) {
        (Ok(v), Ok(r)) if v == r => v,
        _ => {
            error!(%mode, ?vendor_ret, ?reference_ret, "compress return mismatch");
            return Err(CheckFailure::CompressReturn {
                mode,
                vendor: vendor_ret,
                reference: reference_ret,
            });
        }
    };

    if !compare(compressed, scratch, len) {
        error!(%mode, len, "compressed bytes differ");
        return Err(CheckFailure::CompressedBytesMismatch { mode });
    }
    debug!(%mode, len, "compressed streams match");

    let stream = &compressed[..len];
    for (decoder, provider) in [(Side::Vendor, vendor), (Side::Reference, reference)] {
        scratch.fill(0);
        let returned = provider.decompress(scratch, stream);
        if !round_trip_ok(returned, scratch, text) {
            error!(%mode, %decoder, ?returned, "round trip mismatch");
            return Err(CheckFailure::RoundTrip {
                mode,
                decoder,
                returned,
            });
        }
        debug!(%mode, %decoder, len = text.len(), "round trip ok");
    }
    Ok(())
}

fn round_trip_ok(returned: CodecResult, decoded: &[u8], text: &[u8]) -> bool {
    returned == Ok(text.len()) && compare(decoded, text, text.len())
}

/// Dynamic then static, sharing one pair of buffers
pub fn check_compress(
    vendor: &dyn CryptoProvider,
    reference: &dyn CryptoProvider,
    text: &[u8],
    capacity: usize,
) -> CheckResult {
    let mut buffers = CompressionBuffers::new(capacity);
    for mode in CompressMode::ALL {
        check_mode(vendor, reference, mode, text, &mut buffers)?;
    }
    Ok(())
}
