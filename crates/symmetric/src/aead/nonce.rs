//! Deterministic GCM nonce construction
//!
//! A [`NonceSequence`] builds 96-bit nonces from a 4-byte fixed field and a
//! 64-bit big-endian invocation counter. One sequence per key, owned by the
//! caller, guarantees the nonces it hands out are distinct. Once the
//! counter space is used up it refuses to produce more.

use byteorder::{BigEndian, ByteOrder};
use rand::rngs::OsRng;
use rand::RngCore;

use cryptolib_params::utils::symmetric::{GCM_NONCE_FIXED_SIZE, GCM_NONCE_SIZE};

use crate::aead::gcm::GcmNonce;
use crate::error::{validate, Error, Result};

/// Counter-based nonce generator
pub struct NonceSequence {
    fixed: [u8; GCM_NONCE_FIXED_SIZE],
    counter: u64,
}

impl NonceSequence {
    /// Starts a sequence at counter zero
    pub fn new(fixed: [u8; GCM_NONCE_FIXED_SIZE]) -> Self {
        Self { fixed, counter: 0 }
    }

    /// Starts a sequence from a fixed field given as a slice
    pub fn from_slice(fixed: &[u8]) -> Result<Self> {
        validate::length("NonceSequence fixed field", fixed.len(), GCM_NONCE_FIXED_SIZE)?;
        let mut field = [0u8; GCM_NONCE_FIXED_SIZE];
        field.copy_from_slice(fixed);
        Ok(Self::new(field))
    }

    /// Starts a sequence with a random fixed field
    pub fn random() -> Self {
        let mut fixed = [0u8; GCM_NONCE_FIXED_SIZE];
        OsRng.fill_bytes(&mut fixed);
        Self::new(fixed)
    }

    /// Resumes a sequence at a previously persisted counter value
    pub fn resume(fixed: [u8; GCM_NONCE_FIXED_SIZE], counter: u64) -> Self {
        Self { fixed, counter }
    }

    /// Returns the next nonce
    ///
    /// The last counter value is reserved, so a sequence yields 2^64 - 1
    /// nonces and then fails with `NonceSpaceExhausted` on every call.
    pub fn next(&mut self) -> Result<GcmNonce> {
        if self.counter == u64::MAX {
            return Err(Error::NonceSpaceExhausted {
                context: "NonceSequence",
            });
        }

        let mut bytes = [0u8; GCM_NONCE_SIZE];
        bytes[..GCM_NONCE_FIXED_SIZE].copy_from_slice(&self.fixed);
        BigEndian::write_u64(&mut bytes[GCM_NONCE_FIXED_SIZE..], self.counter);
        self.counter += 1;

        Ok(GcmNonce::new(bytes))
    }

    /// Counter value the next nonce will carry
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Nonces left before exhaustion
    pub fn remaining(&self) -> u64 {
        u64::MAX - self.counter
    }

    /// Whether [`next`](Self::next) will fail
    pub fn is_exhausted(&self) -> bool {
        self.counter == u64::MAX
    }
}

impl core::fmt::Debug for NonceSequence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NonceSequence")
            .field("remaining", &self.remaining())
            .finish()
    }
}
