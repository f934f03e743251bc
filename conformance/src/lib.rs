//! Differential conformance harness for the mcapi API
//!
//! Every primitive the `mcapi` crate exposes is run against a trusted
//! reference implementation on fixed inputs, and the outputs must agree
//! byte for byte. The run stops at the first disagreement.
//!
//! ```no_run
//! use mcapi_conformance::{ConsoleReporter, HarnessConfig, Suite};
//!
//! let result = Suite::standard(HarnessConfig::default()).run(&mut ConsoleReporter);
//! assert!(result.is_ok());
//! ```

pub mod checks;
pub mod compare;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod logging;
pub mod provider;
pub mod report;
pub mod suite;

pub use checks::CheckGroup;
pub use config::HarnessConfig;
pub use error::{CheckFailure, HarnessError, SetupError, Side};
pub use fixtures::{AllocPurpose, BufferAllocator, Fixtures, SystemAllocator};
pub use provider::{ReferenceProvider, VendorProvider};
pub use report::{ConsoleReporter, RecordingReporter, Reporter};
pub use suite::Suite;
