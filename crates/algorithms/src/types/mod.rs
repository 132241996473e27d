//! Type-safe wrappers for cryptographic types
//!
//! Fixed-size nonces and digests carry their length in the type so that
//! modes can demand the right size at compile time where it is known, and
//! validate it once at the boundary where it is not.

pub mod digest;
pub mod nonce;

// Sealed trait module (not public)
pub(crate) mod sealed;

pub use digest::Digest;
pub use nonce::Nonce;

// Import and re-export shared secret types
pub use cryptolib_api::types::SecretBytes;
pub use cryptolib_common::security::{EphemeralSecret, SecretBuffer, ZeroizeGuard};
