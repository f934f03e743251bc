//! Huffman codec
//!
//! DEFLATE with a zlib wrapper, driven through the low-level streaming core
//! of `miniz_oxide` so every byte lands in a caller-provided buffer. The two
//! modes select the Huffman coding strategy: dynamic tables built per block,
//! or the fixed table from RFC 1951 section 3.2.6.

use core::fmt;

use miniz_oxide::deflate::core::{
    compress, create_comp_flags_from_zip_params, CompressionStrategy, CompressorOxide,
    TDEFLFlush, TDEFLStatus,
};
use miniz_oxide::inflate::core::inflate_flags::{
    TINFL_FLAG_PARSE_ZLIB_HEADER, TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF,
};
use miniz_oxide::inflate::core::{decompress, DecompressorOxide};
use miniz_oxide::inflate::TINFLStatus;

use crate::error::{validate, Error, Result};
use mcapi_params::codec::{COMPRESS_FIXED, COMPRESS_LEVEL, COMPRESS_WINDOW_BITS};

/// Huffman coding strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HuffmanMode {
    /// Per-block dynamic Huffman tables
    Dynamic,
    /// The fixed RFC 1951 table for every block
    Static,
}

impl HuffmanMode {
    /// Decode the mode from a flag word; only the `COMPRESS_FIXED` bit matters
    pub fn from_flags(flags: u32) -> Self {
        if flags & COMPRESS_FIXED != 0 {
            HuffmanMode::Static
        } else {
            HuffmanMode::Dynamic
        }
    }

    fn strategy(self) -> CompressionStrategy {
        match self {
            HuffmanMode::Dynamic => CompressionStrategy::Default,
            HuffmanMode::Static => CompressionStrategy::Fixed,
        }
    }
}

impl fmt::Display for HuffmanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuffmanMode::Dynamic => write!(f, "dynamic"),
            HuffmanMode::Static => write!(f, "static"),
        }
    }
}

/// Buffer-to-buffer zlib codec
#[derive(Debug, Clone, Copy)]
pub struct HuffmanCodec {
    mode: HuffmanMode,
}

impl HuffmanCodec {
    /// Create a codec that compresses with the given Huffman strategy
    pub fn new(mode: HuffmanMode) -> Self {
        Self { mode }
    }

    /// Compress all of `input` into `out` as one zlib stream.
    ///
    /// Returns the number of bytes written. Fails with a length error when
    /// the finished stream does not fit in `out`.
    pub fn compress(&self, out: &mut [u8], input: &[u8]) -> Result<usize> {
        validate::parameter(!input.is_empty(), "input", "must not be empty")?;
        validate::parameter(!out.is_empty(), "out", "must not be empty")?;

        let flags = create_comp_flags_from_zip_params(
            COMPRESS_LEVEL,
            COMPRESS_WINDOW_BITS,
            self.mode.strategy() as i32,
        );
        let mut compressor = CompressorOxide::new(flags);

        let (status, consumed, written) = compress(&mut compressor, input, out, TDEFLFlush::Finish);
        match status {
            TDEFLStatus::Done if consumed == input.len() => Ok(written),
            // Stopped early with input or trailer still pending: out is full
            TDEFLStatus::Okay | TDEFLStatus::Done => Err(Error::Length {
                context: "compressed output",
                expected: written + 1,
                actual: out.len(),
            }),
            TDEFLStatus::BadParam | TDEFLStatus::PutBufFailed => Err(Error::Processing {
                operation: "deflate",
                details: "compressor rejected its parameters",
            }),
        }
    }

    /// Inflate the zlib stream in `input` into `out`.
    ///
    /// Returns the number of bytes written. The mode the stream was
    /// compressed with is read from the stream itself.
    pub fn decompress(out: &mut [u8], input: &[u8]) -> Result<usize> {
        validate::parameter(!input.is_empty(), "input", "must not be empty")?;
        validate::parameter(!out.is_empty(), "out", "must not be empty")?;

        let mut decompressor = Box::<DecompressorOxide>::default();
        let flags = TINFL_FLAG_PARSE_ZLIB_HEADER | TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF;

        let (status, _consumed, written) = decompress(&mut decompressor, input, out, 0, flags);
        match status {
            TINFLStatus::Done => Ok(written),
            TINFLStatus::HasMoreOutput => Err(Error::Length {
                context: "decompressed output",
                expected: written + 1,
                actual: out.len(),
            }),
            TINFLStatus::NeedsMoreInput => Err(Error::Processing {
                operation: "inflate",
                details: "truncated stream",
            }),
            TINFLStatus::Adler32Mismatch => Err(Error::Processing {
                operation: "inflate",
                details: "adler-32 checksum mismatch",
            }),
            _ => Err(Error::Processing {
                operation: "inflate",
                details: "corrupt stream",
            }),
        }
    }
}
