//! Suite driver
//!
//! Runs the configured checks in order against one vendor and one reference
//! provider and stops at the first failure. The key buffer is owned by the
//! fixtures, so it is released on every way out of [`Suite::run`].

use std::process::ExitCode;

use mcapi_api::{CryptoProvider, HmacAlgorithm};
use tracing::{info, warn};

use crate::checks::compress::check_compress;
use crate::checks::digest::check_digest;
use crate::checks::hmac::check_hmac;
use crate::checks::{CheckGroup, HUFFMAN_LABEL};
use crate::config::HarnessConfig;
use crate::error::{CheckResult, HarnessError};
use crate::fixtures::{BufferAllocator, Fixtures, SystemAllocator, COMPRESSION_TEXT};
use crate::provider::{ReferenceProvider, VendorProvider};
use crate::report::Reporter;

/// Process exit status for a failed run
pub const FAILURE_EXIT: u8 = 255;

/// One conformance run
pub struct Suite<'a> {
    config: HarnessConfig,
    vendor: &'a dyn CryptoProvider,
    reference: &'a dyn CryptoProvider,
    allocator: &'a dyn BufferAllocator,
}

impl Suite<'static> {
    /// The `mcapi` API against RustCrypto and `miniz_oxide`, heap allocator
    pub fn standard(config: HarnessConfig) -> Self {
        Suite::new(config, &VendorProvider, &ReferenceProvider, &SystemAllocator)
    }
}

impl<'a> Suite<'a> {
    pub fn new(
        config: HarnessConfig,
        vendor: &'a dyn CryptoProvider,
        reference: &'a dyn CryptoProvider,
        allocator: &'a dyn BufferAllocator,
    ) -> Self {
        Self {
            config,
            vendor,
            reference,
            allocator,
        }
    }

    /// Run every configured check, reporting as it goes.
    ///
    /// On failure the reporter has already received the diagnostic.
    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<(), HarnessError> {
        let result = self.execute(reporter);
        if let Err(err) = &result {
            warn!(error = %err, "conformance run failed");
            reporter.failed(err);
        }
        result
    }

    fn execute(&self, reporter: &mut dyn Reporter) -> Result<(), HarnessError> {
        self.config
            .validate(COMPRESSION_TEXT.len())
            .map_err(|source| HarnessError::Setup {
                what: "config",
                source,
            })?;
        let fixtures =
            Fixtures::new(&self.config, self.allocator).map_err(|source| HarnessError::Setup {
                what: "key alloc",
                source,
            })?;

        info!(
            vendor = self.vendor.name(),
            reference = self.reference.name(),
            checks = self.config.checks.len(),
            "starting conformance run"
        );
        for &group in &self.config.checks {
            self.run_group(group, &fixtures, reporter)
                .map_err(|failure| HarnessError::Check {
                    check: group.name(),
                    failure,
                })?;
        }
        info!("all checks passed");
        Ok(())
    }

    fn run_group(
        &self,
        group: CheckGroup,
        fixtures: &Fixtures<'_>,
        reporter: &mut dyn Reporter,
    ) -> CheckResult {
        info!(check = group.name(), "running check");
        match group {
            CheckGroup::Hash(algorithm) => {
                check_digest(self.vendor, self.reference, algorithm, fixtures.data())?;
                reporter.passed(algorithm.label());
            }
            CheckGroup::Hmac => {
                for algorithm in HmacAlgorithm::ALL {
                    check_hmac(
                        self.vendor,
                        self.reference,
                        algorithm,
                        fixtures.key(),
                        fixtures.data(),
                    )?;
                    reporter.passed(algorithm.label());
                }
            }
            CheckGroup::Compress => {
                check_compress(
                    self.vendor,
                    self.reference,
                    fixtures.text(),
                    self.config.buffer_capacity,
                )?;
                reporter.passed(HUFFMAN_LABEL);
            }
        }
        Ok(())
    }
}

/// Map a run result onto the process exit status
pub fn exit_code(result: &Result<(), HarnessError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::from(FAILURE_EXIT),
    }
}
