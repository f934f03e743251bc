//! Tracing setup
//!
//! Diagnostics go to stderr so stdout carries nothing but the report.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Install the global subscriber for the binary.
///
/// `filter` is an `EnvFilter` directive such as `warn` or
/// `mcapi_conformance=debug`. Invalid directives fall back to `warn`.
pub fn init_tracing(filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

        if let Err(err) = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
        {
            debug!(error = %err, "global subscriber already installed");
        }
    });
}

/// Initialize tracing for tests.
///
/// Safe to call from every test; only the first call installs anything.
/// Uses `RUST_LOG` if set, otherwise `debug` for this crate.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,mcapi_conformance=debug"));

        if let Err(err) = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .compact(),
            )
            .try_init()
        {
            debug!(error = %err, "test subscriber already installed");
        }
    });
}
