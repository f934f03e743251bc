use super::*;
use hex;
use proptest::prelude::*;

/// RFC 1321 appendix A.5 test suite
#[test]
fn test_md5_rfc1321_suite() {
    let vectors: [(&[u8], &str); 7] = [
        (b"", "d41d8cd98f00b204e9800998ecf8427e"),
        (b"a", "0cc175b9c0f1b6a831c399e269772661"),
        (b"abc", "900150983cd24fb0d6963f7d28e17f72"),
        (b"message digest", "f96b697d7cb7938d525a2f31aaf161d0"),
        (
            b"abcdefghijklmnopqrstuvwxyz",
            "c3fcd3d76192e4007dfb496cca67e13b",
        ),
        (
            b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
            "d174ab98d277d9f5a5611c2c9f419d9f",
        ),
        (
            b"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
            "57edf4a22be3c955ac49da2e2107b67a",
        ),
    ];

    for (msg, expected) in vectors {
        let hash = Md5::digest(msg).unwrap();
        assert_eq!(hex::encode(hash.as_ref()), expected, "msg = {:?}", msg);
    }
}

#[test]
fn test_md5_counting_kilobyte() {
    let data: Vec<u8> = (0..1024).map(|i| i as u8).collect();
    let hash = Md5::digest(&data).unwrap();
    assert_eq!(hex::encode(hash.as_ref()), "b2ea9f7fcea831a4a63b213f41a8855b");
}

#[test]
fn test_md5_padding_boundary() {
    // 55 bytes fit the length in the same block, 56 force an extra block
    let fits = Md5::digest(&[b'x'; 55]).unwrap();
    let spills = Md5::digest(&[b'x'; 56]).unwrap();
    assert_ne!(fits, spills);
    assert_eq!(Md5::output_size(), 16);
    assert_eq!(Md5::block_size(), 64);
    assert_eq!(Md5::name(), "MD5");
}

proptest! {
    #[test]
    fn chunked_update_matches_one_shot(data in proptest::collection::vec(any::<u8>(), 0..600), split in 0usize..600) {
        let split = split.min(data.len());
        let mut h = Md5::new();
        h.update(&data[..split]).unwrap();
        h.update(&data[split..]).unwrap();
        prop_assert_eq!(h.finalize().unwrap(), Md5::digest(&data).unwrap());
    }
}
