//! Cryptographic primitives with constant-time implementation
//!
//! This crate provides the symmetric primitives of cryptolib with a focus on
//! constant-time operation and resistance to side-channel attacks.
//!
//! # Security Features
//!
//! - No table lookups indexed by secret data (the AES S-box is computed
//!   arithmetically)
//! - Automatic zeroization of key schedules and intermediate values
//! - Constant-time tag and MAC comparison
//! - Compiler fences around secret-dependent work
//!
//! # Example
//!
//! ```
//! use cryptolib_algorithms::aead::Gcm;
//! use cryptolib_algorithms::block::{Aes256, BlockCipher};
//!
//! # fn main() -> cryptolib_algorithms::Result<()> {
//! let cipher = Aes256::from_slice(&[0u8; 32])?;
//! let gcm = Gcm::new(cipher)?;
//! let sealed = gcm.seal(&[0u8; 12], b"header", b"test")?;
//! assert_eq!(gcm.open(&[0u8; 12], b"header", &sealed)?, b"test");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Block cipher implementations and modes of operation
pub mod block;
pub use block::{Aes, Aes128, Aes256, BlockCipher, Cbc, Cfb, Ctr, Ecb, Ofb, Tea};

// Hash function implementations
pub mod hash;
pub use hash::{HashFunction, Sha256, Sha512};

// MAC implementations
pub mod mac;
pub use mac::Hmac;

// KDF implementations
pub mod kdf;
pub use kdf::{Hkdf, KeyDerivationFunction};

// AEAD cipher implementations
pub mod aead;
pub use aead::Gcm;

// Type-safe wrappers
pub mod types;
