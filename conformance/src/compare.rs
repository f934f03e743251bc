//! Byte equivalence with explicit lengths

use subtle::ConstantTimeEq;

/// True when the first `len` bytes of `a` and `b` are identical.
///
/// Either slice being shorter than `len` is a mismatch, never a panic or an
/// over-read.
pub fn compare(a: &[u8], b: &[u8], len: usize) -> bool {
    match (a.get(..len), b.get(..len)) {
        (Some(a), Some(b)) => a.ct_eq(b).into(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_only_the_prefix() {
        assert!(compare(b"abcX", b"abcY", 3));
        assert!(!compare(b"abcX", b"abcY", 4));
        assert!(compare(b"", b"", 0));
    }

    #[test]
    fn short_input_is_a_mismatch() {
        assert!(!compare(b"abc", b"abcd", 4));
        assert!(!compare(b"abcd", b"ab", 3));
    }
}
