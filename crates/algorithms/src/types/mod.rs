//! Type-safe wrappers for primitive outputs

pub mod digest;

pub use digest::Digest;
