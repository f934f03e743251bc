use super::*;
use hex;
use proptest::prelude::*;

const TWO_BLOCK_MSG: &[u8] = b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu";

fn counting_kilobyte() -> Vec<u8> {
    (0..1024).map(|i| i as u8).collect()
}

#[test]
fn test_sha256_empty() {
    // NIST test vector: Empty string
    let expected = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    let hash = Sha256::digest(&[]).unwrap();
    assert_eq!(hex::encode(hash.as_ref()), expected);
}

#[test]
fn test_sha256_abc() {
    // NIST test vector: "abc"
    let expected = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    let hash = Sha256::digest(b"abc").unwrap();
    assert_eq!(hex::encode(hash.as_ref()), expected);
}

#[test]
fn test_sha256_long() {
    // NIST test vector: "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"
    let expected = "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1";

    let hash = Sha256::digest(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq").unwrap();
    assert_eq!(hex::encode(hash.as_ref()), expected);
}

#[test]
fn test_sha384_empty() {
    let expected = "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b";

    let hash = Sha384::digest(&[]).unwrap();
    assert_eq!(hex::encode(hash.as_ref()), expected);
}

#[test]
fn test_sha384_abc() {
    let expected = "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7";

    let hash = Sha384::digest(b"abc").unwrap();
    assert_eq!(hex::encode(hash.as_ref()), expected);
}

#[test]
fn test_sha384_two_block() {
    let expected = "09330c33f71147e83d192fc782cd1b4753111b173b3b05d22fa08086e3b0f712fcc7c71a557e2db966c3e9fa91746039";

    let hash = Sha384::digest(TWO_BLOCK_MSG).unwrap();
    assert_eq!(hex::encode(hash.as_ref()), expected);
}

#[test]
fn test_sha512_empty() {
    // NIST test vector: Empty string
    let expected = "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e";

    let hash = Sha512::digest(&[]).unwrap();
    assert_eq!(hex::encode(hash.as_ref()), expected);
}

#[test]
fn test_sha512_abc() {
    let expected = "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f";

    let hash = Sha512::digest(b"abc").unwrap();
    assert_eq!(hex::encode(hash.as_ref()), expected);
}

#[test]
fn test_sha512_two_block() {
    let expected = "8e959b75dae313da8cf4f72814fc143f8f7779c6eb9f7fa17299aeadb6889018501d289e4900f7e4331b99dec4b5433ac7d329eeb6dd26545e96e55b874be909";

    let hash = Sha512::digest(TWO_BLOCK_MSG).unwrap();
    assert_eq!(hex::encode(hash.as_ref()), expected);
}

#[test]
fn test_sha2_counting_kilobyte() {
    let data = counting_kilobyte();

    assert_eq!(
        Sha256::digest(&data).unwrap().to_hex(),
        "785b0751fc2c53dc14a4ce3d800e69ef9ce1009eb327ccf458afe09c242c26c9"
    );
    assert_eq!(
        Sha384::digest(&data).unwrap().to_hex(),
        "55fd17eeb1611f9193f6ac600238ce63aa298c2e332f042b80c8f691f800e4c7505af20c1a86a31f08504587395f081f"
    );
    assert_eq!(
        Sha512::digest(&data).unwrap().to_hex(),
        "37f652be867f28ed033269cbba201af2112c2b3fd334a89fd2f757938ddee815787cc61d6e24a8a33340d0f7e86ffc058816b88530766ba6e231620a130b566c"
    );
}

#[test]
fn test_sha512_length_field_boundary() {
    // 111 bytes leave room for the 16-byte length, 112 do not
    assert_eq!(
        Sha512::digest(&[b'x'; 111]).unwrap().to_hex(),
        "9a2a120825c2319867758ec277924f6faa254968bf752046dacdd948d8ad299b10359fd04bfd7d3810b5fa1b16a294236138baff981cbb85248478053ac4d3dd"
    );
    assert_eq!(
        Sha512::digest(&[b'x'; 112]).unwrap().to_hex(),
        "a3722b515ef40c910f2419f6e0da8ca51d410114ce6272faae64045f9e9f630e7fa8dd5a3243c9860b899d148c3da4bc0f9e07454542604d030bb55531fe0d5b"
    );
}

#[test]
fn test_finalize_resets_state() {
    let mut h = Sha384::new();
    h.update(b"some earlier message").unwrap();
    let _ = h.finalize().unwrap();

    h.update(b"abc").unwrap();
    assert_eq!(h.finalize().unwrap(), Sha384::digest(b"abc").unwrap());
}

#[test]
fn test_algorithm_metadata() {
    assert_eq!(Sha256::output_size(), 32);
    assert_eq!(Sha256::block_size(), 64);
    assert_eq!(Sha384::output_size(), 48);
    assert_eq!(Sha384::block_size(), 128);
    assert_eq!(Sha512::output_size(), 64);
    assert_eq!(Sha512::name(), "SHA-512");
}

proptest! {
    #[test]
    fn sha256_chunked_matches_one_shot(data in proptest::collection::vec(any::<u8>(), 0..400), chunk in 1usize..97) {
        let mut h = Sha256::new();
        for piece in data.chunks(chunk) {
            h.update(piece).unwrap();
        }
        prop_assert_eq!(h.finalize().unwrap(), Sha256::digest(&data).unwrap());
    }

    #[test]
    fn sha512_chunked_matches_one_shot(data in proptest::collection::vec(any::<u8>(), 0..400), chunk in 1usize..193) {
        let mut h = Sha512::new();
        for piece in data.chunks(chunk) {
            h.update(piece).unwrap();
        }
        prop_assert_eq!(h.finalize().unwrap(), Sha512::digest(&data).unwrap());
    }
}
