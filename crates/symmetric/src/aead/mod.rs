//! Authenticated encryption bound to managed key material

pub mod gcm;
pub mod nonce;

pub use gcm::{open, seal, Aes128Gcm, Aes256Gcm, AesCiphertextPackage, AesGcm, GcmNonce};
pub use nonce::NonceSequence;
