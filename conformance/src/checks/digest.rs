//! Digest equivalence

use mcapi_api::{CryptoProvider, Error, HashAlgorithm, HashContext};
use tracing::{debug, error};

use crate::compare::compare;
use crate::error::{CheckFailure, CheckResult, Side};

fn run_side(
    ctx: &mut dyn HashContext,
    algorithm: HashAlgorithm,
    data: &[u8],
    out: &mut [u8],
    side: Side,
) -> CheckResult {
    let label = algorithm.label();
    let provider_err = |source| CheckFailure::Provider { label, side, source };
    if ctx.algorithm() != algorithm {
        return Err(provider_err(Error::InvalidState {
            context: "hash context",
            message: format!("asked for {algorithm}, got {}", ctx.algorithm()),
        }));
    }
    ctx.initialize().map_err(provider_err)?;
    ctx.update(data).map_err(provider_err)?;
    ctx.finalize(out).map_err(provider_err)
}

/// Hash `data` with both providers and require identical digests
pub fn check_digest(
    vendor: &dyn CryptoProvider,
    reference: &dyn CryptoProvider,
    algorithm: HashAlgorithm,
    data: &[u8],
) -> CheckResult {
    let label = algorithm.label();
    let size = algorithm.digest_size();
    let mut vendor_out = vec![0u8; size];
    let mut reference_out = vec![0u8; size];

    run_side(&mut *vendor.hash(algorithm), algorithm, data, &mut vendor_out, Side::Vendor)?;
    run_side(
        &mut *reference.hash(algorithm),
        algorithm,
        data,
        &mut reference_out,
        Side::Reference,
    )?;

    if !compare(&vendor_out, &reference_out, size) {
        error!(
            check = label,
            vendor = %hex::encode(&vendor_out),
            reference = %hex::encode(&reference_out),
            "digest mismatch"
        );
        return Err(CheckFailure::DigestMismatch { label });
    }
    debug!(check = label, algorithm = %algorithm, len = size, "digests match");
    Ok(())
}
