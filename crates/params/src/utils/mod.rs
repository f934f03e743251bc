//! Constant groups shared across the workspace

pub mod codec;
pub mod harness;
pub mod hash;
