//! Constants for the Huffman codec

/// Mode flag selecting dynamic Huffman tables
pub const COMPRESS_DYNAMIC: u32 = 0;

/// Mode flag bit selecting the fixed (static) Huffman table
pub const COMPRESS_FIXED: u32 = 1;

/// zlib compression level used by both codec front-ends
pub const COMPRESS_LEVEL: i32 = 6;

/// Window bits; positive values request a zlib header
pub const COMPRESS_WINDOW_BITS: i32 = 15;

/// Output buffer too small
pub const BUFFER_E: i32 = -132;

/// Bad function argument provided
pub const BAD_FUNC_ARG: i32 = -173;

/// Compression stream failed
pub const COMPRESS_E: i32 = -210;

/// Decompression stream failed
pub const DECOMPRESS_E: i32 = -212;
