//! SHA-1 hash function
//!
//! FIPS 180-4 section 6.1. SHA-1 is broken for collision resistance and is
//! only provided for compatibility with existing systems.

use byteorder::{BigEndian, ByteOrder};
use zeroize::Zeroize;

use crate::error::Result;
use crate::hash::{Hash, HashAlgorithm, HashFunction};
use crate::types::Digest;
use mcapi_params::hash::{SHA1_BLOCK_SIZE, SHA1_OUTPUT_SIZE};

/// Initial hash values for SHA-1
const H0: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

/// Round constants, one per group of twenty rounds
const K: [u32; 4] = [0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xca62c1d6];

/// SHA-1 algorithm marker type
pub enum Sha1Algorithm {}

impl HashAlgorithm for Sha1Algorithm {
    const OUTPUT_SIZE: usize = SHA1_OUTPUT_SIZE;
    const BLOCK_SIZE: usize = SHA1_BLOCK_SIZE;
    const ALGORITHM_ID: &'static str = "SHA-1";
}

/// SHA-1 hash function
#[derive(Clone, Zeroize)]
pub struct Sha1 {
    state: [u32; 5],
    buffer: [u8; SHA1_BLOCK_SIZE],
    buffer_idx: usize,
    total_bytes: u64,
}

impl Drop for Sha1 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Sha1 {
    fn init() -> Self {
        Sha1 {
            state: H0,
            buffer: [0u8; SHA1_BLOCK_SIZE],
            buffer_idx: 0,
            total_bytes: 0,
        }
    }

    fn compress(state: &mut [u32; 5], block: &[u8]) {
        // Rolling 16-word window over the 80-word schedule
        let mut w = [0u32; 16];
        BigEndian::read_u32_into(&block[..SHA1_BLOCK_SIZE], &mut w);

        let [mut a, mut b, mut c, mut d, mut e] = *state;

        for t in 0..80 {
            if t >= 16 {
                let next = (w[(t + 13) & 15] ^ w[(t + 8) & 15] ^ w[(t + 2) & 15] ^ w[t & 15])
                    .rotate_left(1);
                w[t & 15] = next;
            }
            let f = match t / 20 {
                0 => (b & c) | (!b & d),
                2 => (b & c) | (b & d) | (c & d),
                _ => b ^ c ^ d,
            };
            let tmp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(K[t / 20])
                .wrapping_add(w[t & 15]);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = tmp;
        }

        for (s, v) in state.iter_mut().zip([a, b, c, d, e]) {
            *s = s.wrapping_add(v);
        }
        w.zeroize();
    }

    fn update_internal(&mut self, mut input: &[u8]) -> Result<()> {
        self.total_bytes = self.total_bytes.wrapping_add(input.len() as u64);
        while !input.is_empty() {
            let fill = core::cmp::min(input.len(), SHA1_BLOCK_SIZE - self.buffer_idx);
            self.buffer[self.buffer_idx..self.buffer_idx + fill].copy_from_slice(&input[..fill]);
            self.buffer_idx += fill;
            input = &input[fill..];
            if self.buffer_idx == SHA1_BLOCK_SIZE {
                Self::compress(&mut self.state, &self.buffer);
                self.buffer_idx = 0;
            }
        }
        Ok(())
    }

    fn finalize_internal(&mut self) -> Result<Hash> {
        let bit_len = self.total_bytes.wrapping_mul(8);

        self.buffer[self.buffer_idx] = 0x80;
        self.buffer[self.buffer_idx + 1..].fill(0);
        if self.buffer_idx >= SHA1_BLOCK_SIZE - 8 {
            Self::compress(&mut self.state, &self.buffer);
            self.buffer = [0u8; SHA1_BLOCK_SIZE];
        }

        BigEndian::write_u64(&mut self.buffer[SHA1_BLOCK_SIZE - 8..], bit_len);
        Self::compress(&mut self.state, &self.buffer);

        let mut out = vec![0u8; SHA1_OUTPUT_SIZE];
        BigEndian::write_u32_into(&self.state, &mut out);
        self.zeroize();
        Ok(out)
    }
}

impl HashFunction for Sha1 {
    type Algorithm = Sha1Algorithm;
    type Output = Digest<SHA1_OUTPUT_SIZE>;

    fn new() -> Self {
        Sha1::init()
    }

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.update_internal(data)?;
        Ok(self)
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        let hash = self.finalize_internal()?;
        *self = Sha1::init();
        Digest::from_slice(&hash)
    }
}
