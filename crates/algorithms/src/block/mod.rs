//! Block ciphers and their modes of operation
//!
//! Every cipher in this module avoids lookup tables indexed by secret data.
//! Keys are validated when the cipher is created; block operations validate
//! only the (public) block length.

pub mod aes;
pub mod modes;
pub mod tea;

pub use aes::{Aes, Aes128, Aes256};
pub use modes::{Cbc, Cfb, CounterPosition, Ctr, Ecb, Ofb};
pub use tea::Tea;

use crate::error::Result;
use rand::{CryptoRng, RngCore};

/// Type-level constants describing a block cipher
pub trait CipherAlgorithm {
    /// Key size in bytes
    const KEY_SIZE: usize;

    /// Block size in bytes
    const BLOCK_SIZE: usize;

    /// Human-readable algorithm name
    fn name() -> &'static str;
}

/// Trait for block ciphers
pub trait BlockCipher: Sized {
    /// The algorithm this cipher implements
    type Algorithm: CipherAlgorithm;

    /// Key type with a length fixed at compile time
    type Key: AsRef<[u8]>;

    /// Creates a cipher instance from a correctly sized key
    fn new(key: &Self::Key) -> Self;

    /// Creates a cipher instance from raw key bytes
    ///
    /// Fails with `InvalidKeyLength` if the slice has the wrong size.
    fn from_slice(key: &[u8]) -> Result<Self>;

    /// Encrypts a single block in place
    fn encrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Decrypts a single block in place
    fn decrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Generates a random key
    fn generate_key<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Key;

    /// Returns the key size in bytes
    fn key_size() -> usize {
        Self::Algorithm::KEY_SIZE
    }

    /// Returns the block size in bytes
    fn block_size() -> usize {
        Self::Algorithm::BLOCK_SIZE
    }

    /// Returns the algorithm name
    fn name() -> &'static str {
        Self::Algorithm::name()
    }
}
