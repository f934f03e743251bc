//! Huffman compression with C-style return codes
//!
//! Both functions return the number of bytes written to `out`, or one of
//! the negative codes from [`mcapi_params::codec`].

use mcapi_algorithms::{Error as PrimitiveError, HuffmanCodec, HuffmanMode};
use mcapi_params::codec::{BAD_FUNC_ARG, BUFFER_E, COMPRESS_E, DECOMPRESS_E};

/// Compress `input` into `out` as a zlib stream.
///
/// `flags & COMPRESS_FIXED` selects the static Huffman table; otherwise
/// dynamic tables are built.
pub fn huffman_compress(out: &mut [u8], input: &[u8], flags: u32) -> i32 {
    let codec = HuffmanCodec::new(HuffmanMode::from_flags(flags));
    to_return_code(codec.compress(out, input), COMPRESS_E)
}

/// Decompress the zlib stream in `input` into `out`.
pub fn huffman_decompress(out: &mut [u8], input: &[u8]) -> i32 {
    to_return_code(HuffmanCodec::decompress(out, input), DECOMPRESS_E)
}

fn to_return_code(result: mcapi_algorithms::Result<usize>, stream_error: i32) -> i32 {
    match result {
        Ok(written) => i32::try_from(written).unwrap_or(BUFFER_E),
        Err(PrimitiveError::Parameter { .. }) => BAD_FUNC_ARG,
        Err(PrimitiveError::Length { .. }) => BUFFER_E,
        Err(_) => stream_error,
    }
}
