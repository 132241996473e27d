//! HMAC (RFC 2104 / FIPS 198-1)
//!
//! The key is always hashed, and the hashed or raw form is then chosen per
//! byte with a mask, so construction time depends only on the public key
//! length. Tag verification is constant-time and fails closed on a length
//! mismatch.

use cryptolib_common::security::SecretBuffer;
use cryptolib_internal::constant_time::{ct_eq, ct_mask};
use zeroize::Zeroize;

use crate::error::{validate, Error, Result};
use crate::hash::HashFunction;

/// Largest supported hash block size (SHA-512)
const MAX_BLOCK: usize = 128;

const IPAD_BYTE: u8 = 0x36;
const OPAD_BYTE: u8 = 0x5c;

/// Streaming HMAC over any [`HashFunction`]
#[derive(Clone)]
pub struct Hmac<H: HashFunction> {
    inner: H,
    opad: SecretBuffer<MAX_BLOCK>,
    finalized: bool,
}

impl<H: HashFunction> Hmac<H> {
    /// Keys a new MAC instance
    pub fn new(key: &[u8]) -> Result<Self> {
        let bs = H::block_size();
        validate::parameter(bs <= MAX_BLOCK, "hash_block_size", "block size exceeds 128 bytes")?;

        let hashed = H::digest(key)?;
        let mask = ct_mask(key.len() > bs);

        let mut k_prime = SecretBuffer::<MAX_BLOCK>::zeroed();
        for (i, kp) in k_prime.as_mut_slice()[..bs].iter_mut().enumerate() {
            let raw = key.get(i).copied().unwrap_or(0);
            let digested = hashed.as_ref().get(i).copied().unwrap_or(0);
            *kp = (digested & mask) | (raw & !mask);
        }

        let mut ipad = SecretBuffer::<MAX_BLOCK>::zeroed();
        let mut opad = SecretBuffer::<MAX_BLOCK>::zeroed();
        for ((i, o), k) in ipad
            .as_mut_slice()
            .iter_mut()
            .zip(opad.as_mut_slice().iter_mut())
            .zip(k_prime.as_slice()[..bs].iter())
        {
            *i = k ^ IPAD_BYTE;
            *o = k ^ OPAD_BYTE;
        }

        let mut inner = H::new();
        inner.update(&ipad.as_slice()[..bs])?;

        Ok(Self {
            inner,
            opad,
            finalized: false,
        })
    }

    /// Feeds more data into the MAC
    pub fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        if self.finalized {
            return Err(Error::param("hmac_state", "cannot update after finalization"));
        }
        self.inner.update(data)?;
        Ok(self)
    }

    /// Produces the tag; the instance cannot be used afterwards
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        if self.finalized {
            return Err(Error::param("hmac_state", "already finalized"));
        }
        self.finalized = true;

        let inner_hash = self.inner.finalize()?;
        let mut outer = H::new();
        outer.update(&self.opad.as_slice()[..H::block_size()])?;
        outer.update(inner_hash.as_ref())?;
        let tag = outer.finalize()?;

        self.opad.zeroize();
        Ok(tag.as_ref().to_vec())
    }

    /// One-shot MAC
    pub fn mac(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let mut h = Self::new(key)?;
        h.update(data)?;
        h.finalize()
    }

    /// Recomputes the MAC and compares it with `tag` in constant time
    ///
    /// Fails with `AuthenticationFailure` on any mismatch, including a tag of
    /// the wrong length.
    pub fn verify(key: &[u8], data: &[u8], tag: &[u8]) -> Result<()> {
        let mut expected = Self::mac(key, data)?;
        let ok = ct_eq(&expected, tag);
        expected.zeroize();
        validate::authentication(ok, "HMAC")
    }
}
