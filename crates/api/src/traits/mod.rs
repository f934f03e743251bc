//! Capability traits consumed by the conformance harness

pub mod hash;
pub mod mac;
pub mod provider;

pub use hash::HashContext;
pub use mac::HmacContext;
pub use provider::CryptoProvider;
