//! Authenticated encryption, key derivation and key lifecycle management
//!
//! This crate builds the user-facing layer of cryptolib on top of the
//! constant-time primitives in `cryptolib-algorithms`:
//!
//! - [`keys`]: 128/256-bit keys and [`KeyMaterial`] with revocation and
//!   scoped, zeroizing access to raw key buffers
//! - [`kdf`]: HKDF-SHA-256 key derivation producing [`KeyMaterial`]
//! - [`aead`]: AES-GCM bound to key material, plus deterministic nonce
//!   sequences
//!
//! Failures use the shared [`Error`] type. Diagnostics are emitted through
//! `tracing` and only ever carry algorithm names and lengths.

#![forbid(unsafe_code)]

pub mod aead;
pub mod cipher;
pub mod error;
pub mod kdf;
pub mod keys;

// Re-export main types for convenience
pub use aead::{open, seal, Aes128Gcm, Aes256Gcm, AesCiphertextPackage, AesGcm, GcmNonce, NonceSequence};
pub use cipher::{Aead, SymmetricCipher};
pub use kdf::KeyDeriver;
pub use keys::{revoke, with_key, Key, KeyMaterial, KeySize};

// Re-export the shared error system
pub use error::{validate, Error, Result, ResultExt};
