//! The two implementations the harness compares

pub mod reference;
pub mod vendor;

pub use reference::ReferenceProvider;
pub use vendor::VendorProvider;

use mcapi_api::{Error, Result};

/// Fail unless `out` is exactly `expected` bytes
pub(crate) fn exact_output(context: &'static str, out: &[u8], expected: usize) -> Result<()> {
    if out.len() != expected {
        return Err(Error::InvalidLength {
            context,
            expected,
            actual: out.len(),
        });
    }
    Ok(())
}

pub(crate) fn unkeyed(context: &'static str) -> Error {
    Error::InvalidState {
        context,
        message: "no key has been set".into(),
    }
}
