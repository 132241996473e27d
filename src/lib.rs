//! # cryptolib
//!
//! A symmetric cryptography core: a constant-time AES block cipher, AES-GCM
//! authenticated encryption, HKDF key derivation and key material that is
//! wiped on every exit path.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cryptolib = "0.1"
//! ```
//!
//! ## Features
//!
//! - `symmetric` (default): key management, KDF and AEAD ([`cryptolib-symmetric`])
//! - `algorithms`: the underlying primitives ([`cryptolib-algorithms`])
//! - `rand`: re-export `rand` with `std` enabled
//! - `full`: all of the above
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`cryptolib-api`]: shared error type and secret containers
//! - [`cryptolib-internal`]: constant-time helpers
//! - [`cryptolib-common`]: zeroizing buffers and memory barriers
//! - [`cryptolib-params`]: algorithm size constants
//! - [`cryptolib-algorithms`]: AES, GCM, SHA-2, HMAC, HKDF and block modes
//! - [`cryptolib-symmetric`]: high-level AEAD, key derivation and key lifecycle
//!
//! ## Example
//!
//! ```
//! use cryptolib::prelude::*;
//!
//! # fn main() -> cryptolib::prelude::Result<()> {
//! let deriver = KeyDeriver::new();
//! let key = deriver.derive_key(b"master secret", Some(b"salt"), Some(b"session"), KeySize::Aes256)?;
//!
//! let cipher = Aes256Gcm::new(&key)?;
//! let nonce = Aes256Gcm::generate_nonce();
//! let sealed = cipher.encrypt(&nonce, b"attack at dawn", Some(b"v1"))?;
//! assert_eq!(cipher.decrypt(&nonce, &sealed, Some(b"v1"))?, b"attack at dawn");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

// Core re-exports (always available)
pub use cryptolib_api as api;
pub use cryptolib_common as common;
pub use cryptolib_internal as internal;
pub use cryptolib_params as params;

// Feature-gated re-exports
#[cfg(feature = "algorithms")]
pub use cryptolib_algorithms as algorithms;

#[cfg(feature = "symmetric")]
pub use cryptolib_symmetric as symmetric;

// Ecosystem crates that appear in public signatures
pub use subtle;
pub use zeroize;

#[cfg(feature = "rand")]
pub use rand;

/// Common imports for cryptolib users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export security types
    pub use crate::common::{EphemeralSecret, SecretBuffer, ZeroizeGuard};

    // Constant-time helpers
    pub use crate::internal::{ct_eq, ct_select};

    #[cfg(feature = "algorithms")]
    pub use crate::algorithms::{BlockCipher, HashFunction, KeyDerivationFunction};

    #[cfg(feature = "symmetric")]
    pub use crate::symmetric::{
        open, revoke, seal, with_key, Aead, Aes128Gcm, Aes256Gcm, AesGcm, GcmNonce, Key,
        KeyDeriver, KeyMaterial, KeySize, NonceSequence, SymmetricCipher,
    };
}

// Convenience re-exports at the crate root
pub use api::{Error, Result};
pub use common::{EphemeralSecret, SecretBuffer};
