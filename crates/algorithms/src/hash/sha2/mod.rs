//! SHA-2 hash function implementations
//!
//! SHA-256, SHA-384 and SHA-512 as specified in FIPS PUB 180-4. SHA-384
//! shares the 64-bit compression engine with SHA-512 and differs only in its
//! initial state and truncated output.

use core::ops::{BitAnd, BitXor, Not};

use byteorder::{BigEndian, ByteOrder};
use zeroize::Zeroize;

use crate::error::Result;
use crate::hash::{Hash, HashAlgorithm, HashFunction};
use crate::types::Digest;
use mcapi_params::hash::{
    SHA256_BLOCK_SIZE, SHA256_OUTPUT_SIZE, SHA384_OUTPUT_SIZE, SHA512_BLOCK_SIZE,
    SHA512_OUTPUT_SIZE,
};

// SHA-256 round constants
const K256: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

// SHA-512 round constants
const K512: [u64; 80] = [
    0x428a2f98d728ae22, 0x7137449123ef65cd, 0xb5c0fbcfec4d3b2f, 0xe9b5dba58189dbbc,
    0x3956c25bf348b538, 0x59f111f1b605d019, 0x923f82a4af194f9b, 0xab1c5ed5da6d8118,
    0xd807aa98a3030242, 0x12835b0145706fbe, 0x243185be4ee4b28c, 0x550c7dc3d5ffb4e2,
    0x72be5d74f27b896f, 0x80deb1fe3b1696b1, 0x9bdc06a725c71235, 0xc19bf174cf692694,
    0xe49b69c19ef14ad2, 0xefbe4786384f25e3, 0x0fc19dc68b8cd5b5, 0x240ca1cc77ac9c65,
    0x2de92c6f592b0275, 0x4a7484aa6ea6e483, 0x5cb0a9dcbd41fbd4, 0x76f988da831153b5,
    0x983e5152ee66dfab, 0xa831c66d2db43210, 0xb00327c898fb213f, 0xbf597fc7beef0ee4,
    0xc6e00bf33da88fc2, 0xd5a79147930aa725, 0x06ca6351e003826f, 0x142929670a0e6e70,
    0x27b70a8546d22ffc, 0x2e1b21385c26c926, 0x4d2c6dfc5ac42aed, 0x53380d139d95b3df,
    0x650a73548baf63de, 0x766a0abb3c77b2a8, 0x81c2c92e47edaee6, 0x92722c851482353b,
    0xa2bfe8a14cf10364, 0xa81a664bbc423001, 0xc24b8b70d0f89791, 0xc76c51a30654be30,
    0xd192e819d6ef5218, 0xd69906245565a910, 0xf40e35855771202a, 0x106aa07032bbd1b8,
    0x19a4c116b8d2d0c8, 0x1e376c085141ab53, 0x2748774cdf8eeb99, 0x34b0bcb5e19b48a8,
    0x391c0cb3c5c95a63, 0x4ed8aa4ae3418acb, 0x5b9cca4f7763e373, 0x682e6ff3d6b2b8a3,
    0x748f82ee5defb2fc, 0x78a5636f43172f60, 0x84c87814a1f0ab72, 0x8cc702081a6439ec,
    0x90befffa23631e28, 0xa4506cebde82bde9, 0xbef9a3f7b2c67915, 0xc67178f2e372532b,
    0xca273eceea26619c, 0xd186b8c721c0c207, 0xeada7dd6cde0eb1e, 0xf57d4f7fee6ed178,
    0x06f067aa72176fba, 0x0a637dc5a2c898a6, 0x113f9804bef90dae, 0x1b710b35131c471b,
    0x28db77f523047d84, 0x32caab7b40c72493, 0x3c9ebe0a15c9bebc, 0x431d67c49c100d4c,
    0x4cc5d4becb3e42b6, 0x597f299cfc657e2a, 0x5fcb6fab3ad6faec, 0x6c44198c4a475817,
];

const SHA256_IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

const SHA384_IV: [u64; 8] = [
    0xcbbb9d5dc1059ed8, 0x629a292a367cd507, 0x9159015a3070dd17, 0x152fecd8f70e5939,
    0x67332667ffc00b31, 0x8eb44a8768581511, 0xdb0c2e0d64f98fa7, 0x47b5481dbefa4fa4,
];

const SHA512_IV: [u64; 8] = [
    0x6a09e667f3bcc908, 0xbb67ae8584caa73b, 0x3c6ef372fe94f82b, 0xa54ff53a5f1d36f1,
    0x510e527fade682d1, 0x9b05688c2b3e6c1f, 0x1f83d9abfb41bd6b, 0x5be0cd19137e2179,
];

#[inline(always)]
fn ch<T>(e: T, f: T, g: T) -> T
where
    T: Copy + BitAnd<Output = T> + BitXor<Output = T> + Not<Output = T>,
{
    (e & f) ^ (!e & g)
}

#[inline(always)]
fn maj<T>(a: T, b: T, c: T) -> T
where
    T: Copy + BitAnd<Output = T> + BitXor<Output = T>,
{
    (a & b) ^ (a & c) ^ (b & c)
}

// Message schedule mixing functions (lower-case sigma in FIPS 180-4)
#[inline(always)]
fn sigma0_32(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn sigma1_32(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

#[inline(always)]
fn sigma0_64(x: u64) -> u64 {
    x.rotate_right(1) ^ x.rotate_right(8) ^ (x >> 7)
}

#[inline(always)]
fn sigma1_64(x: u64) -> u64 {
    x.rotate_right(19) ^ x.rotate_right(61) ^ (x >> 6)
}

/// Marker type for SHA-256 algorithm
pub enum Sha256Algorithm {}

impl HashAlgorithm for Sha256Algorithm {
    const OUTPUT_SIZE: usize = SHA256_OUTPUT_SIZE;
    const BLOCK_SIZE: usize = SHA256_BLOCK_SIZE;
    const ALGORITHM_ID: &'static str = "SHA-256";
}

/// Marker type for SHA-384 algorithm
pub enum Sha384Algorithm {}

impl HashAlgorithm for Sha384Algorithm {
    const OUTPUT_SIZE: usize = SHA384_OUTPUT_SIZE;
    const BLOCK_SIZE: usize = SHA512_BLOCK_SIZE;
    const ALGORITHM_ID: &'static str = "SHA-384";
}

/// Marker type for SHA-512 algorithm
pub enum Sha512Algorithm {}

impl HashAlgorithm for Sha512Algorithm {
    const OUTPUT_SIZE: usize = SHA512_OUTPUT_SIZE;
    const BLOCK_SIZE: usize = SHA512_BLOCK_SIZE;
    const ALGORITHM_ID: &'static str = "SHA-512";
}

/// SHA-256 hash function state
#[derive(Clone, Zeroize)]
pub struct Sha256 {
    state: [u32; 8],
    buffer: [u8; SHA256_BLOCK_SIZE],
    buffer_idx: usize,
    total_bytes: u64,
}

impl Drop for Sha256 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Shared 64-bit engine behind SHA-384 and SHA-512
#[derive(Clone, Zeroize)]
struct Engine512 {
    state: [u64; 8],
    buffer: [u8; SHA512_BLOCK_SIZE],
    buffer_idx: usize,
    total_bytes: u128,
}

impl Drop for Engine512 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// SHA-384 hash function state
#[derive(Clone)]
pub struct Sha384 {
    engine: Engine512,
}

/// SHA-512 hash function state
#[derive(Clone)]
pub struct Sha512 {
    engine: Engine512,
}

impl Sha256 {
    fn init() -> Self {
        Sha256 {
            state: SHA256_IV,
            buffer: [0u8; SHA256_BLOCK_SIZE],
            buffer_idx: 0,
            total_bytes: 0,
        }
    }

    fn compress(state: &mut [u32; 8], block: &[u8]) {
        let mut w = [0u32; 16];
        BigEndian::read_u32_into(&block[..SHA256_BLOCK_SIZE], &mut w);

        let mut v = *state;
        for (t, k) in K256.iter().enumerate() {
            if t >= 16 {
                w[t & 15] = w[t & 15]
                    .wrapping_add(sigma0_32(w[(t + 1) & 15]))
                    .wrapping_add(w[(t + 9) & 15])
                    .wrapping_add(sigma1_32(w[(t + 14) & 15]));
            }
            let [a, b, c, d, e, f, g, h] = v;
            let t1 = h
                .wrapping_add(e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25))
                .wrapping_add(ch(e, f, g))
                .wrapping_add(*k)
                .wrapping_add(w[t & 15]);
            let t2 = (a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22))
                .wrapping_add(maj(a, b, c));
            v = [t1.wrapping_add(t2), a, b, c, d.wrapping_add(t1), e, f, g];
        }

        for (s, x) in state.iter_mut().zip(v) {
            *s = s.wrapping_add(x);
        }
        w.zeroize();
        v.zeroize();
    }

    fn update_internal(&mut self, mut input: &[u8]) -> Result<()> {
        while !input.is_empty() {
            let fill = core::cmp::min(input.len(), SHA256_BLOCK_SIZE - self.buffer_idx);
            self.buffer[self.buffer_idx..self.buffer_idx + fill].copy_from_slice(&input[..fill]);
            self.buffer_idx += fill;
            input = &input[fill..];
            if self.buffer_idx == SHA256_BLOCK_SIZE {
                Self::compress(&mut self.state, &self.buffer);
                self.total_bytes = self.total_bytes.wrapping_add(SHA256_BLOCK_SIZE as u64);
                self.buffer_idx = 0;
            }
        }
        Ok(())
    }

    fn finalize_internal(&mut self) -> Result<Hash> {
        self.total_bytes = self.total_bytes.wrapping_add(self.buffer_idx as u64);
        let bit_len = self.total_bytes.wrapping_mul(8);

        self.buffer[self.buffer_idx] = 0x80;
        self.buffer[self.buffer_idx + 1..].fill(0);
        if self.buffer_idx >= SHA256_BLOCK_SIZE - 8 {
            Self::compress(&mut self.state, &self.buffer);
            self.buffer = [0u8; SHA256_BLOCK_SIZE];
        }

        BigEndian::write_u64(&mut self.buffer[SHA256_BLOCK_SIZE - 8..], bit_len);
        Self::compress(&mut self.state, &self.buffer);

        let mut out = vec![0u8; SHA256_OUTPUT_SIZE];
        BigEndian::write_u32_into(&self.state, &mut out);
        self.zeroize();
        Ok(out)
    }
}

impl Engine512 {
    fn with_iv(iv: [u64; 8]) -> Self {
        Engine512 {
            state: iv,
            buffer: [0u8; SHA512_BLOCK_SIZE],
            buffer_idx: 0,
            total_bytes: 0,
        }
    }

    fn compress(state: &mut [u64; 8], block: &[u8]) {
        let mut w = [0u64; 16];
        BigEndian::read_u64_into(&block[..SHA512_BLOCK_SIZE], &mut w);

        let mut v = *state;
        for (t, k) in K512.iter().enumerate() {
            if t >= 16 {
                w[t & 15] = w[t & 15]
                    .wrapping_add(sigma0_64(w[(t + 1) & 15]))
                    .wrapping_add(w[(t + 9) & 15])
                    .wrapping_add(sigma1_64(w[(t + 14) & 15]));
            }
            let [a, b, c, d, e, f, g, h] = v;
            let t1 = h
                .wrapping_add(e.rotate_right(14) ^ e.rotate_right(18) ^ e.rotate_right(41))
                .wrapping_add(ch(e, f, g))
                .wrapping_add(*k)
                .wrapping_add(w[t & 15]);
            let t2 = (a.rotate_right(28) ^ a.rotate_right(34) ^ a.rotate_right(39))
                .wrapping_add(maj(a, b, c));
            v = [t1.wrapping_add(t2), a, b, c, d.wrapping_add(t1), e, f, g];
        }

        for (s, x) in state.iter_mut().zip(v) {
            *s = s.wrapping_add(x);
        }
        w.zeroize();
        v.zeroize();
    }

    fn update(&mut self, mut input: &[u8]) -> Result<()> {
        while !input.is_empty() {
            let fill = core::cmp::min(input.len(), SHA512_BLOCK_SIZE - self.buffer_idx);
            self.buffer[self.buffer_idx..self.buffer_idx + fill].copy_from_slice(&input[..fill]);
            self.buffer_idx += fill;
            input = &input[fill..];
            if self.buffer_idx == SHA512_BLOCK_SIZE {
                Self::compress(&mut self.state, &self.buffer);
                self.total_bytes = self.total_bytes.wrapping_add(SHA512_BLOCK_SIZE as u128);
                self.buffer_idx = 0;
            }
        }
        Ok(())
    }

    /// Pads, runs the final block(s) and returns the first `out_len` bytes
    /// of the big-endian state. The engine is wiped afterwards.
    fn finalize(&mut self, out_len: usize) -> Result<Hash> {
        self.total_bytes = self.total_bytes.wrapping_add(self.buffer_idx as u128);
        let bit_len = self.total_bytes.wrapping_mul(8);

        self.buffer[self.buffer_idx] = 0x80;
        self.buffer[self.buffer_idx + 1..].fill(0);
        if self.buffer_idx >= SHA512_BLOCK_SIZE - 16 {
            Self::compress(&mut self.state, &self.buffer);
            self.buffer = [0u8; SHA512_BLOCK_SIZE];
        }

        BigEndian::write_u128(&mut self.buffer[SHA512_BLOCK_SIZE - 16..], bit_len);
        Self::compress(&mut self.state, &self.buffer);

        let mut out = vec![0u8; SHA512_OUTPUT_SIZE];
        BigEndian::write_u64_into(&self.state, &mut out);
        out.truncate(out_len);
        self.zeroize();
        Ok(out)
    }
}

impl HashFunction for Sha256 {
    type Algorithm = Sha256Algorithm;
    type Output = Digest<SHA256_OUTPUT_SIZE>;

    fn new() -> Self {
        Sha256::init()
    }

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.update_internal(data)?;
        Ok(self)
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        let hash = self.finalize_internal()?;
        *self = Sha256::init();
        Digest::from_slice(&hash)
    }
}

impl HashFunction for Sha384 {
    type Algorithm = Sha384Algorithm;
    type Output = Digest<SHA384_OUTPUT_SIZE>;

    fn new() -> Self {
        Sha384 {
            engine: Engine512::with_iv(SHA384_IV),
        }
    }

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.engine.update(data)?;
        Ok(self)
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        let hash = self.engine.finalize(SHA384_OUTPUT_SIZE)?;
        self.engine = Engine512::with_iv(SHA384_IV);
        Digest::from_slice(&hash)
    }
}

impl HashFunction for Sha512 {
    type Algorithm = Sha512Algorithm;
    type Output = Digest<SHA512_OUTPUT_SIZE>;

    fn new() -> Self {
        Sha512 {
            engine: Engine512::with_iv(SHA512_IV),
        }
    }

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.engine.update(data)?;
        Ok(self)
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        let hash = self.engine.finalize(SHA512_OUTPUT_SIZE)?;
        self.engine = Engine512::with_iv(SHA512_IV);
        Digest::from_slice(&hash)
    }
}

#[cfg(test)]
mod tests;
