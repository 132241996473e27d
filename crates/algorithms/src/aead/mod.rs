//! Authenticated encryption with associated data
//!
//! AES-GCM is the only AEAD construction provided. It accepts any
//! [`BlockCipher`](crate::block::BlockCipher) with a 128-bit block.

pub mod gcm;

pub use gcm::Gcm;
