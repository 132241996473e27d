//! Symmetric cipher traits
//!
//! This module defines the traits shared by the high-level AEAD types.

use crate::error::Result;
use crate::keys::KeyMaterial;

/// Common trait for all symmetric encryption algorithms
pub trait SymmetricCipher {
    /// Creates a new cipher instance bound to the given key material
    ///
    /// Fails with `UseAfterRevoke` if the material has been revoked.
    fn new(key: &KeyMaterial) -> Result<Self>
    where
        Self: Sized;

    /// Returns the name of this cipher
    fn name() -> &'static str;
}

/// Trait for Authenticated Encryption with Associated Data
pub trait Aead: SymmetricCipher {
    /// The nonce type used by this cipher
    type Nonce;

    /// Encrypts plaintext with associated data, returning `ciphertext || tag`
    fn encrypt(&self, nonce: &Self::Nonce, plaintext: &[u8], aad: Option<&[u8]>)
        -> Result<Vec<u8>>;

    /// Decrypts ciphertext with associated data
    ///
    /// Returns `AuthenticationFailure` without releasing any plaintext if
    /// the tag does not verify.
    fn decrypt(
        &self,
        nonce: &Self::Nonce,
        ciphertext: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Vec<u8>>;

    /// Generates a random nonce from the operating system RNG
    fn generate_nonce() -> Self::Nonce;
}
