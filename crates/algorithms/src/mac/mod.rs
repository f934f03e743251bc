//! Message Authentication Code (MAC) implementations
//!
//! Only HMAC is provided; it is generic over every [`HashFunction`](crate::hash::HashFunction)
//! in this crate.

pub mod hmac;
pub use hmac::Hmac;
