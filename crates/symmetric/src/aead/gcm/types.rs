//! Nonce and ciphertext package types for AES-GCM

use rand::rngs::OsRng;

use cryptolib_algorithms::types::Nonce;
use cryptolib_params::utils::symmetric::{GCM_NONCE_SIZE, GCM_TAG_SIZE};

use crate::error::{validate, Result, ResultExt};

/// 96-bit GCM nonce
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GcmNonce(Nonce<GCM_NONCE_SIZE>);

impl GcmNonce {
    /// Wraps 12 nonce bytes
    pub fn new(bytes: [u8; GCM_NONCE_SIZE]) -> Self {
        Self(Nonce::new(bytes))
    }

    /// Copies a nonce from a slice, failing with `NonceLengthError`
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(Self(
            Nonce::from_slice(bytes).with_context("GcmNonce")?,
        ))
    }

    /// Draws a random nonce from the operating system RNG
    ///
    /// Random nonces are safe for up to 2^32 messages per key; beyond that
    /// use a [`NonceSequence`](crate::aead::NonceSequence).
    pub fn generate() -> Self {
        Self(Nonce::random(&mut OsRng))
    }

    /// Nonce bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Typed view used by the GCM core
    pub fn as_nonce(&self) -> &Nonce<GCM_NONCE_SIZE> {
        &self.0
    }
}

impl AsRef<[u8]> for GcmNonce {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// A nonce shipped together with the `ciphertext || tag` it produced
///
/// Serialized as `nonce || ciphertext || tag`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AesCiphertextPackage {
    /// Nonce used for encryption
    pub nonce: GcmNonce,
    /// Ciphertext followed by the 16-byte tag
    pub ciphertext: Vec<u8>,
}

impl AesCiphertextPackage {
    /// Bundles a nonce with its ciphertext
    pub fn new(nonce: GcmNonce, ciphertext: Vec<u8>) -> Self {
        Self { nonce, ciphertext }
    }

    /// Serializes to `nonce || ciphertext || tag`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(GCM_NONCE_SIZE + self.ciphertext.len());
        out.extend_from_slice(self.nonce.as_bytes());
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Parses `nonce || ciphertext || tag`
    ///
    /// Fails with `InvalidLength` when the input cannot hold a nonce and a
    /// tag. The tag itself is only checked on decryption.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        validate::min_length(
            "AesCiphertextPackage",
            bytes.len(),
            GCM_NONCE_SIZE + GCM_TAG_SIZE,
        )?;
        let (nonce, ciphertext) = bytes.split_at(GCM_NONCE_SIZE);
        Ok(Self {
            nonce: GcmNonce::from_slice(nonce)?,
            ciphertext: ciphertext.to_vec(),
        })
    }
}
