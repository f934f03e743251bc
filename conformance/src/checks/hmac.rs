//! HMAC equivalence, one sub-case per underlying hash

use mcapi_api::{CryptoProvider, HmacAlgorithm, HmacContext};
use tracing::{debug, error};

use crate::compare::compare;
use crate::error::{CheckFailure, CheckResult, Side};

fn run_side(
    ctx: &mut dyn HmacContext,
    algorithm: HmacAlgorithm,
    key: &[u8],
    data: &[u8],
    out: &mut [u8],
    side: Side,
) -> CheckResult {
    let label = algorithm.label();
    let provider_err = |source| CheckFailure::Provider { label, side, source };
    ctx.set_key(algorithm, key).map_err(provider_err)?;
    ctx.update(data).map_err(provider_err)?;
    ctx.finalize(out).map_err(provider_err)
}

/// Compute the tag over `data` under `key` with both providers.
///
/// Each sub-case gets fresh contexts and buffers of exactly the tag size.
pub fn check_hmac(
    vendor: &dyn CryptoProvider,
    reference: &dyn CryptoProvider,
    algorithm: HmacAlgorithm,
    key: &[u8],
    data: &[u8],
) -> CheckResult {
    let label = algorithm.label();
    let size = algorithm.digest_size();
    let mut vendor_out = vec![0u8; size];
    let mut reference_out = vec![0u8; size];

    run_side(&mut *vendor.hmac(), algorithm, key, data, &mut vendor_out, Side::Vendor)?;
    run_side(
        &mut *reference.hmac(),
        algorithm,
        key,
        data,
        &mut reference_out,
        Side::Reference,
    )?;

    if !compare(&vendor_out, &reference_out, size) {
        error!(
            check = label,
            vendor = %hex::encode(&vendor_out),
            reference = %hex::encode(&reference_out),
            "tag mismatch"
        );
        return Err(CheckFailure::DigestMismatch { label });
    }
    debug!(check = label, algorithm = %algorithm, len = size, "tags match");
    Ok(())
}
