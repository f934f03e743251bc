//! End-to-end runs of the harness, including deliberately broken providers

use std::cell::{Cell, RefCell};

use mcapi_api::{
    CodecError, CodecResult, CompressMode, CryptoProvider, Error as ApiError, HashAlgorithm,
    HashContext, HmacAlgorithm, HmacContext, Result as ApiResult,
};
use mcapi_conformance::checks::compress::check_mode;
use mcapi_conformance::checks::compress::CompressionBuffers;
use mcapi_conformance::checks::digest::check_digest;
use mcapi_conformance::checks::hmac::check_hmac;
use mcapi_conformance::fixtures::COMPRESSION_TEXT;
use mcapi_conformance::logging::init_test_tracing;
use mcapi_conformance::suite::exit_code;
use mcapi_conformance::{
    AllocPurpose, BufferAllocator, CheckFailure, CheckGroup, HarnessConfig, HarnessError,
    RecordingReporter, ReferenceProvider, SetupError, Side, Suite, SystemAllocator,
    VendorProvider,
};
use mcapi_params::codec::COMPRESS_E;
use proptest::prelude::*;

const FULL_REPORT: [&str; 10] = [
    "md5         mcapi test passed",
    "sha         mcapi test passed",
    "sha256      mcapi test passed",
    "sha384      mcapi test passed",
    "sha512      mcapi test passed",
    "hmac sha    mcapi test passed",
    "hmac sha256 mcapi test passed",
    "hmac sha384 mcapi test passed",
    "hmac sha512 mcapi test passed",
    "huffman     mcapi test passed",
];

fn counting_data() -> Vec<u8> {
    (0..1024).map(|i| i as u8).collect()
}

fn digest_with(provider: &dyn CryptoProvider, algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    let mut ctx = provider.hash(algorithm);
    ctx.initialize().unwrap();
    ctx.update(data).unwrap();
    let mut out = vec![0u8; algorithm.digest_size()];
    ctx.finalize(&mut out).unwrap();
    out
}

fn hmac_with(provider: &dyn CryptoProvider, algorithm: HmacAlgorithm, key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut ctx = provider.hmac();
    ctx.set_key(algorithm, key).unwrap();
    ctx.update(data).unwrap();
    let mut out = vec![0u8; algorithm.digest_size()];
    ctx.finalize(&mut out).unwrap();
    out
}

// ---------------------------------------------------------------------------
// Fault injection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderFault {
    /// Correct length, corrupted first byte
    Lying,
    /// Correct bytes, length one short
    Short,
    /// Reports success without writing anything
    Stale,
}

#[derive(Default)]
struct Faults {
    flip_digest: Option<HashAlgorithm>,
    flip_hmac: Option<HmacAlgorithm>,
    /// Hand back a context for the second algorithm when asked for the first
    swap_hash: Option<(HashAlgorithm, HashAlgorithm)>,
    reject_hmac_key: Option<HmacAlgorithm>,
    compress_code: Option<i32>,
    /// Same length, one byte of the compressed stream altered
    flip_compressed: bool,
    decoder: Option<DecoderFault>,
}

/// The vendor provider with configurable breakage and call counters
#[derive(Default)]
struct FaultyVendor {
    faults: Faults,
    hash_calls: RefCell<Vec<HashAlgorithm>>,
    decompress_calls: Cell<usize>,
}

impl FaultyVendor {
    fn with(faults: Faults) -> Self {
        Self {
            faults,
            ..Self::default()
        }
    }
}

struct FlipHash(Box<dyn HashContext>);

impl HashContext for FlipHash {
    fn algorithm(&self) -> HashAlgorithm {
        self.0.algorithm()
    }
    fn initialize(&mut self) -> ApiResult<()> {
        self.0.initialize()
    }
    fn update(&mut self, data: &[u8]) -> ApiResult<()> {
        self.0.update(data)
    }
    fn finalize(&mut self, out: &mut [u8]) -> ApiResult<()> {
        self.0.finalize(out)?;
        out[0] ^= 0x01;
        Ok(())
    }
}

struct FlipHmac {
    inner: Box<dyn HmacContext>,
    target: HmacAlgorithm,
    current: Option<HmacAlgorithm>,
}

impl HmacContext for FlipHmac {
    fn set_key(&mut self, algorithm: HmacAlgorithm, key: &[u8]) -> ApiResult<()> {
        self.current = Some(algorithm);
        self.inner.set_key(algorithm, key)
    }
    fn update(&mut self, data: &[u8]) -> ApiResult<()> {
        self.inner.update(data)
    }
    fn finalize(&mut self, out: &mut [u8]) -> ApiResult<()> {
        self.inner.finalize(out)?;
        if self.current == Some(self.target) {
            let last = out.len() - 1;
            out[last] ^= 0x80;
        }
        Ok(())
    }
}

struct RejectKey {
    inner: Box<dyn HmacContext>,
    target: HmacAlgorithm,
}

impl HmacContext for RejectKey {
    fn set_key(&mut self, algorithm: HmacAlgorithm, key: &[u8]) -> ApiResult<()> {
        if algorithm == self.target {
            return Err(ApiError::InvalidParameter {
                context: "hmac key",
                message: "key rejected".into(),
            });
        }
        self.inner.set_key(algorithm, key)
    }
    fn update(&mut self, data: &[u8]) -> ApiResult<()> {
        self.inner.update(data)
    }
    fn finalize(&mut self, out: &mut [u8]) -> ApiResult<()> {
        self.inner.finalize(out)
    }
}

impl CryptoProvider for FaultyVendor {
    fn name(&self) -> &'static str {
        "faulty-mcapi"
    }

    fn hash(&self, algorithm: HashAlgorithm) -> Box<dyn HashContext> {
        self.hash_calls.borrow_mut().push(algorithm);
        let inner = match self.faults.swap_hash {
            Some((asked, given)) if asked == algorithm => VendorProvider.hash(given),
            _ => VendorProvider.hash(algorithm),
        };
        if self.faults.flip_digest == Some(algorithm) {
            Box::new(FlipHash(inner))
        } else {
            inner
        }
    }

    fn hmac(&self) -> Box<dyn HmacContext> {
        let inner = VendorProvider.hmac();
        if let Some(target) = self.faults.reject_hmac_key {
            return Box::new(RejectKey { inner, target });
        }
        match self.faults.flip_hmac {
            Some(target) => Box::new(FlipHmac {
                inner,
                target,
                current: None,
            }),
            None => inner,
        }
    }

    fn compress(&self, out: &mut [u8], input: &[u8], mode: CompressMode) -> CodecResult {
        if let Some(code) = self.faults.compress_code {
            out.fill(0xEE);
            return Err(CodecError { code });
        }
        let n = VendorProvider.compress(out, input, mode)?;
        if self.faults.flip_compressed {
            out[n / 2] ^= 0x01;
        }
        Ok(n)
    }

    fn decompress(&self, out: &mut [u8], input: &[u8]) -> CodecResult {
        self.decompress_calls.set(self.decompress_calls.get() + 1);
        match self.faults.decoder {
            None => VendorProvider.decompress(out, input),
            Some(DecoderFault::Lying) => {
                let n = VendorProvider.decompress(out, input)?;
                out[0] ^= 0xFF;
                Ok(n)
            }
            Some(DecoderFault::Short) => {
                let n = VendorProvider.decompress(out, input)?;
                Ok(n - 1)
            }
            Some(DecoderFault::Stale) => {
                let mut elsewhere = vec![0u8; out.len()];
                VendorProvider.decompress(&mut elsewhere, input)
            }
        }
    }
}

/// Allocator that records what it hands out and what comes back
#[derive(Default)]
struct TrackingAllocator {
    fail: bool,
    allocated: Cell<usize>,
    released: RefCell<Vec<(usize, bool)>>,
}

impl BufferAllocator for TrackingAllocator {
    fn allocate(&self, capacity: usize, purpose: AllocPurpose) -> Result<Vec<u8>, SetupError> {
        if self.fail {
            return Err(SetupError::Alloc { capacity, purpose });
        }
        self.allocated.set(self.allocated.get() + 1);
        Ok(Vec::with_capacity(capacity))
    }

    fn release(&self, buffer: Vec<u8>, purpose: AllocPurpose) {
        assert_eq!(purpose, AllocPurpose::Key);
        let wiped = buffer.iter().all(|&b| b == 0);
        self.released.borrow_mut().push((buffer.len(), wiped));
    }
}

fn run_with(
    vendor: &dyn CryptoProvider,
    allocator: &dyn BufferAllocator,
    config: HarnessConfig,
) -> (Result<(), HarnessError>, Vec<String>) {
    init_test_tracing();
    let mut reporter = RecordingReporter::new();
    let result = Suite::new(config, vendor, &ReferenceProvider, allocator).run(&mut reporter);
    (result, reporter.lines().to_vec())
}

// ---------------------------------------------------------------------------
// Full runs
// ---------------------------------------------------------------------------

#[test]
fn full_suite_passes_and_prints_every_label() {
    let (result, lines) = run_with(&VendorProvider, &SystemAllocator, HarnessConfig::default());
    assert!(result.is_ok(), "{result:?}");
    assert_eq!(lines, FULL_REPORT);
    assert_eq!(exit_code(&result), std::process::ExitCode::SUCCESS);
}

#[test]
fn standard_suite_uses_vendor_and_reference() {
    init_test_tracing();
    let mut reporter = RecordingReporter::new();
    Suite::standard(HarnessConfig::default())
        .run(&mut reporter)
        .unwrap();
    assert_eq!(reporter.lines().len(), 10);
}

#[test]
fn configured_subset_runs_in_order() {
    let config = HarnessConfig::default().with_checks([
        CheckGroup::Compress,
        CheckGroup::Hash(HashAlgorithm::Sha512),
    ]);
    let (result, lines) = run_with(&VendorProvider, &SystemAllocator, config);
    assert!(result.is_ok());
    assert_eq!(
        lines,
        ["huffman     mcapi test passed", "sha512      mcapi test passed"]
    );
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_md5_over_counting_data() {
    let data = counting_data();
    check_digest(&VendorProvider, &ReferenceProvider, HashAlgorithm::Md5, &data).unwrap();
    assert_eq!(
        hex::encode(digest_with(&VendorProvider, HashAlgorithm::Md5, &data)),
        "b2ea9f7fcea831a4a63b213f41a8855b"
    );
}

#[test]
fn scenario_sha512_over_counting_data() {
    let data = counting_data();
    check_digest(&VendorProvider, &ReferenceProvider, HashAlgorithm::Sha512, &data).unwrap();
    let vendor = digest_with(&VendorProvider, HashAlgorithm::Sha512, &data);
    assert_eq!(vendor.len(), 64);
    assert_eq!(vendor, digest_with(&ReferenceProvider, HashAlgorithm::Sha512, &data));
}

#[test]
fn scenario_hmac_sha256_with_jefe() {
    let data = counting_data();
    check_hmac(
        &VendorProvider,
        &ReferenceProvider,
        HmacAlgorithm::Sha256,
        b"Jefe",
        &data,
    )
    .unwrap();
    assert_eq!(
        hex::encode(hmac_with(&VendorProvider, HmacAlgorithm::Sha256, b"Jefe", &data)),
        "752a37b5c0854b9488c210f0b861d16e6a8b58f5a05981607be232524eefa6a0"
    );
}

#[test]
fn scenario_static_compression_round_trip() {
    let mut buffers = CompressionBuffers::new(1024);
    check_mode(
        &VendorProvider,
        &ReferenceProvider,
        CompressMode::Static,
        COMPRESSION_TEXT,
        &mut buffers,
    )
    .unwrap();

    let mut vendor_out = [0u8; 1024];
    let mut reference_out = [0u8; 1024];
    let v = VendorProvider
        .compress(&mut vendor_out, COMPRESSION_TEXT, CompressMode::Static)
        .unwrap();
    let r = ReferenceProvider
        .compress(&mut reference_out, COMPRESSION_TEXT, CompressMode::Static)
        .unwrap();
    assert_eq!(v, r);
    assert_eq!(&vendor_out[..v], &reference_out[..r]);
}

#[test]
fn every_compressor_decoder_pairing_round_trips() {
    let providers: [&dyn CryptoProvider; 2] = [&VendorProvider, &ReferenceProvider];
    for mode in CompressMode::ALL {
        for compressor in providers {
            let mut packed = [0u8; 1024];
            let n = compressor
                .compress(&mut packed, COMPRESSION_TEXT, mode)
                .unwrap();
            for decoder in providers {
                let mut plain = [0u8; 1024];
                let m = decoder.decompress(&mut plain, &packed[..n]).unwrap();
                assert_eq!(
                    &plain[..m],
                    COMPRESSION_TEXT,
                    "{} -> {} ({mode})",
                    compressor.name(),
                    decoder.name()
                );
            }
        }
    }
}

#[test]
fn all_hmac_tags_have_their_digest_size() {
    let data = counting_data();
    for algorithm in HmacAlgorithm::ALL {
        let tag = hmac_with(&VendorProvider, algorithm, b"Jefe", &data);
        assert_eq!(tag.len(), algorithm.digest_size());
        assert_eq!(tag, hmac_with(&ReferenceProvider, algorithm, b"Jefe", &data));
    }
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[test]
fn flipped_digest_stops_the_run() {
    let vendor = FaultyVendor::with(Faults {
        flip_digest: Some(HashAlgorithm::Sha256),
        ..Faults::default()
    });
    let (result, lines) = run_with(&vendor, &SystemAllocator, HarnessConfig::default());

    let err = result.unwrap_err();
    assert_eq!(
        err.failure(),
        Some(&CheckFailure::DigestMismatch { label: "sha256" })
    );
    assert_eq!(
        lines,
        [
            "md5         mcapi test passed",
            "sha         mcapi test passed",
            "sha256 final memcmp failed",
            "mcapi check_sha256 failed",
        ]
    );
    // Nothing after the failing check was attempted
    assert_eq!(
        *vendor.hash_calls.borrow(),
        [HashAlgorithm::Md5, HashAlgorithm::Sha1, HashAlgorithm::Sha256]
    );
    assert_ne!(exit_code(&Err(err)), std::process::ExitCode::SUCCESS);
}

#[test]
fn flipped_hmac_reports_the_sub_case() {
    let vendor = FaultyVendor::with(Faults {
        flip_hmac: Some(HmacAlgorithm::Sha384),
        ..Faults::default()
    });
    let (result, lines) = run_with(&vendor, &SystemAllocator, HarnessConfig::default());

    assert!(matches!(
        result,
        Err(HarnessError::Check { check: "hmac", .. })
    ));
    assert_eq!(
        &lines[5..],
        [
            "hmac sha    mcapi test passed",
            "hmac sha256 mcapi test passed",
            "hmac sha384 final memcmp failed",
            "mcapi check_hmac failed",
        ]
    );
}

#[test]
fn negative_compress_code_is_a_return_failure() {
    let vendor = FaultyVendor::with(Faults {
        compress_code: Some(COMPRESS_E),
        ..Faults::default()
    });
    let config = HarnessConfig::default().with_checks([CheckGroup::Compress]);
    let (result, lines) = run_with(&vendor, &SystemAllocator, config);

    match result.unwrap_err().failure() {
        Some(CheckFailure::CompressReturn {
            mode: CompressMode::Dynamic,
            vendor,
            reference,
        }) => {
            assert_eq!(*vendor, Err(CodecError { code: COMPRESS_E }));
            assert!(reference.is_ok());
        }
        other => panic!("unexpected failure {other:?}"),
    }
    assert_eq!(
        lines,
        ["compress dynamic ret failed", "mcapi check_compress failed"]
    );
    assert_eq!(vendor.decompress_calls.get(), 0);
}

#[test]
fn altered_compressed_byte_is_a_compare_failure() {
    let vendor = FaultyVendor::with(Faults {
        flip_compressed: true,
        ..Faults::default()
    });
    let config = HarnessConfig::default().with_checks([CheckGroup::Compress]);
    let (result, lines) = run_with(&vendor, &SystemAllocator, config);

    assert_eq!(
        result.unwrap_err().failure(),
        Some(&CheckFailure::CompressedBytesMismatch {
            mode: CompressMode::Dynamic
        })
    );
    assert_eq!(
        lines,
        ["compress dynamic cmp failed", "mcapi check_compress failed"]
    );
    // Decoding is never attempted on a stream that already differs
    assert_eq!(vendor.decompress_calls.get(), 0);
}

#[test]
fn altered_static_stream_is_caught_before_decoding() {
    let vendor = FaultyVendor::with(Faults {
        flip_compressed: true,
        ..Faults::default()
    });
    let mut buffers = CompressionBuffers::new(1024);
    let failure = check_mode(
        &vendor,
        &ReferenceProvider,
        CompressMode::Static,
        COMPRESSION_TEXT,
        &mut buffers,
    )
    .unwrap_err();

    assert_eq!(
        failure,
        CheckFailure::CompressedBytesMismatch {
            mode: CompressMode::Static
        }
    );
    assert_eq!(vendor.decompress_calls.get(), 0);
}

#[test]
fn wrong_hash_context_is_a_vendor_call_failure() {
    let vendor = FaultyVendor::with(Faults {
        swap_hash: Some((HashAlgorithm::Md5, HashAlgorithm::Sha1)),
        ..Faults::default()
    });
    let (result, lines) = run_with(&vendor, &SystemAllocator, HarnessConfig::default());

    let err = result.unwrap_err();
    assert!(matches!(
        err.failure(),
        Some(CheckFailure::Provider {
            label: "md5",
            side: Side::Vendor,
            source: ApiError::InvalidState { .. },
        })
    ));
    assert_eq!(lines.len(), 2);
    assert!(
        lines[0].starts_with("md5 vendor call failed: "),
        "{}",
        lines[0]
    );
    assert_eq!(lines[1], "mcapi check_md5 failed");
    assert_eq!(*vendor.hash_calls.borrow(), [HashAlgorithm::Md5]);
}

#[test]
fn rejected_hmac_key_stops_the_run() {
    let vendor = FaultyVendor::with(Faults {
        reject_hmac_key: Some(HmacAlgorithm::Sha256),
        ..Faults::default()
    });
    let (result, lines) = run_with(&vendor, &SystemAllocator, HarnessConfig::default());

    let err = result.unwrap_err();
    assert!(matches!(err, HarnessError::Check { check: "hmac", .. }));
    assert!(matches!(
        err.failure(),
        Some(CheckFailure::Provider {
            label: "hmac sha256",
            side: Side::Vendor,
            source: ApiError::InvalidParameter {
                context: "hmac key",
                ..
            },
        })
    ));
    assert_eq!(
        &lines[5..],
        [
            "hmac sha    mcapi test passed",
            "hmac sha256 vendor call failed: invalid parameter 'hmac key': key rejected",
            "mcapi check_hmac failed",
        ]
    );
    assert!(!lines.iter().any(|line| line.starts_with("huffman")));
    assert_eq!(vendor.decompress_calls.get(), 0);
}

#[test]
fn lying_decoder_is_caught() {
    let vendor = FaultyVendor::with(Faults {
        decoder: Some(DecoderFault::Lying),
        ..Faults::default()
    });
    let config = HarnessConfig::default().with_checks([CheckGroup::Compress]);
    let (result, lines) = run_with(&vendor, &SystemAllocator, config);

    assert!(matches!(
        result.unwrap_err().failure(),
        Some(CheckFailure::RoundTrip {
            mode: CompressMode::Dynamic,
            decoder: Side::Vendor,
            ..
        })
    ));
    assert_eq!(lines[0], "mcapi decompress dynamic cmp failed");
}

#[test]
fn short_decoder_length_is_caught() {
    let vendor = FaultyVendor::with(Faults {
        decoder: Some(DecoderFault::Short),
        ..Faults::default()
    });
    let mut buffers = CompressionBuffers::new(1024);
    let failure = check_mode(
        &vendor,
        &ReferenceProvider,
        CompressMode::Static,
        COMPRESSION_TEXT,
        &mut buffers,
    )
    .unwrap_err();

    assert_eq!(
        failure,
        CheckFailure::RoundTrip {
            mode: CompressMode::Static,
            decoder: Side::Vendor,
            returned: Ok(COMPRESSION_TEXT.len() - 1),
        }
    );
}

#[test]
fn stale_buffer_never_passes_for_a_silent_decoder() {
    let vendor = FaultyVendor::with(Faults {
        decoder: Some(DecoderFault::Stale),
        ..Faults::default()
    });
    let mut buffers = CompressionBuffers::new(1024);

    // A correct dynamic pass leaves decoded text behind in the scratch buffer
    check_mode(
        &VendorProvider,
        &ReferenceProvider,
        CompressMode::Dynamic,
        COMPRESSION_TEXT,
        &mut buffers,
    )
    .unwrap();

    let failure = check_mode(
        &vendor,
        &ReferenceProvider,
        CompressMode::Static,
        COMPRESSION_TEXT,
        &mut buffers,
    )
    .unwrap_err();
    assert!(matches!(
        failure,
        CheckFailure::RoundTrip {
            decoder: Side::Vendor,
            ..
        }
    ));
}

#[test]
fn allocator_failure_is_fatal_before_any_check() {
    let vendor = FaultyVendor::default();
    let allocator = TrackingAllocator {
        fail: true,
        ..TrackingAllocator::default()
    };
    let (result, lines) = run_with(&vendor, &allocator, HarnessConfig::default());

    assert!(matches!(
        result,
        Err(HarnessError::Setup {
            source: SetupError::Alloc {
                capacity: 32,
                purpose: AllocPurpose::Key,
            },
            ..
        })
    ));
    assert_eq!(lines, ["mcapi key alloc failed"]);
    assert!(vendor.hash_calls.borrow().is_empty());
}

#[test]
fn invalid_config_is_a_setup_error() {
    let allocator = TrackingAllocator::default();
    let config = HarnessConfig::default().with_buffer_capacity(512);
    let (result, _) = run_with(&VendorProvider, &allocator, config);

    assert!(matches!(
        result,
        Err(HarnessError::Setup {
            source: SetupError::Config(_),
            ..
        })
    ));
    assert_eq!(allocator.allocated.get(), 0);
}

#[test]
fn key_is_wiped_and_released_after_success() {
    let allocator = TrackingAllocator::default();
    let (result, _) = run_with(&VendorProvider, &allocator, HarnessConfig::default());

    assert!(result.is_ok());
    assert_eq!(allocator.allocated.get(), 1);
    assert_eq!(*allocator.released.borrow(), [(4, true)]);
}

#[test]
fn key_is_wiped_and_released_after_failure() {
    let vendor = FaultyVendor::with(Faults {
        flip_digest: Some(HashAlgorithm::Md5),
        ..Faults::default()
    });
    let allocator = TrackingAllocator::default();
    let (result, _) = run_with(&vendor, &allocator, HarnessConfig::default());

    assert!(result.is_err());
    assert_eq!(*allocator.released.borrow(), [(4, true)]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn vendor_digests_match_reference(data in proptest::collection::vec(any::<u8>(), 0..700)) {
        for algorithm in HashAlgorithm::ALL {
            prop_assert!(check_digest(&VendorProvider, &ReferenceProvider, algorithm, &data).is_ok());
        }
    }

    #[test]
    fn vendor_hmac_matches_reference(
        key in proptest::collection::vec(any::<u8>(), 0..200),
        data in proptest::collection::vec(any::<u8>(), 0..300),
    ) {
        for algorithm in HmacAlgorithm::ALL {
            prop_assert!(check_hmac(&VendorProvider, &ReferenceProvider, algorithm, &key, &data).is_ok());
        }
    }
}
