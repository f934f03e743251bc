//! Type-safe digest implementation with size guarantees
//!
//! Provides the `Digest` type, representing the output of a
//! hash function with compile-time size guarantees.

use core::fmt;
use core::ops::Deref;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::error::{validate, Result};

/// A digest with a fixed size
#[derive(Clone, Zeroize)]
pub struct Digest<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> Digest<N> {
    /// Create a new digest from an existing array
    pub fn new(data: [u8; N]) -> Self {
        Self { data }
    }

    /// Create from a slice, if it has the correct length
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        validate::length("Digest::from_slice", slice.len(), N)?;
        let mut data = [0u8; N];
        data.copy_from_slice(slice);
        Ok(Self { data })
    }

    /// Get the length of the digest
    pub fn len(&self) -> usize {
        N
    }

    /// Always false; present for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// Copy the digest into `out`, which must be exactly `N` bytes
    pub fn copy_into(&self, out: &mut [u8]) -> Result<()> {
        validate::length("digest output", out.len(), N)?;
        out.copy_from_slice(&self.data);
        Ok(())
    }

    /// Convert to a hexadecimal string
    pub fn to_hex(&self) -> String {
        hex::encode(self.data)
    }
}

impl<const N: usize> AsRef<[u8]> for Digest<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<const N: usize> Deref for Digest<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<const N: usize> PartialEq for Digest<N> {
    fn eq(&self, other: &Self) -> bool {
        self.data.ct_eq(&other.data).into()
    }
}

impl<const N: usize> Eq for Digest<N> {}

impl<const N: usize> fmt::Debug for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest<{}>({})", N, self.to_hex())
    }
}

impl<const N: usize> fmt::Display for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
