//! Galois/Counter Mode (NIST SP 800-38D)
//!
//! Only 96-bit nonces and full 128-bit tags are supported. Nonce and length
//! checks run before the block cipher is touched, and [`Gcm::open`]
//! verifies the tag over the received ciphertext before decrypting any of
//! it, so a forged message never produces plaintext bytes.
//!
//! `Gcm` is stateless: encrypting two messages under one key with the same
//! nonce is not detected here and must be prevented by the caller.

pub mod ghash;

use byteorder::{BigEndian, ByteOrder};
use zeroize::{Zeroize, Zeroizing};

use crate::block::BlockCipher;
use crate::error::{validate, Result};
use crate::types::nonce::AesGcmCompatible;
use crate::types::{Nonce, SecretBuffer};
use cryptolib_common::security::barrier;
use cryptolib_internal::constant_time::ct_eq;
use cryptolib_params::utils::symmetric::{
    AES_BLOCK_SIZE, GCM_MAX_PLAINTEXT_SIZE, GCM_NONCE_SIZE, GCM_TAG_SIZE,
};

use ghash::process_ghash;

/// Nonce and size checks shared by seal and open, run before any cipher work
fn check_lengths(nonce: &[u8], data_len: usize, max: u64) -> Result<()> {
    validate::nonce_length("GCM", nonce.len(), GCM_NONCE_SIZE)?;
    validate::input_size("GCM", data_len as u64, max)
}

/// GCM over a 128-bit block cipher
#[derive(Clone)]
pub struct Gcm<B: BlockCipher> {
    cipher: B,
    h: SecretBuffer<AES_BLOCK_SIZE>,
}

impl<B: BlockCipher> Gcm<B> {
    /// Wraps `cipher` and derives the hash subkey `H = E_K(0^128)`
    ///
    /// Fails with `InvalidParameter` for ciphers whose block is not 16 bytes.
    pub fn new(cipher: B) -> Result<Self> {
        validate::parameter(
            B::block_size() == AES_BLOCK_SIZE,
            "block_size",
            "GCM requires a 128-bit block cipher",
        )?;

        let mut h = [0u8; AES_BLOCK_SIZE];
        cipher.encrypt_block(&mut h)?;
        let h_buf = SecretBuffer::new(h);
        h.zeroize();

        Ok(Self { cipher, h: h_buf })
    }

    /// Encrypts `plaintext` and returns `ciphertext || tag`
    pub fn seal(&self, nonce: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        check_lengths(nonce, plaintext.len(), GCM_MAX_PLAINTEXT_SIZE)?;

        let j0 = Self::initial_counter(nonce);

        let mut output = Vec::with_capacity(plaintext.len() + GCM_TAG_SIZE);
        output.extend_from_slice(plaintext);
        self.apply_keystream(&j0, &mut output)?;

        let tag = self.compute_tag(&j0, aad, &output)?;
        output.extend_from_slice(tag.as_ref());

        Ok(output)
    }

    /// Verifies and decrypts `ciphertext || tag`
    ///
    /// Any mismatch, including input shorter than a tag, is reported as
    /// `AuthenticationFailure` and nothing is decrypted.
    pub fn open(&self, nonce: &[u8], aad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let body_len = ciphertext.len().saturating_sub(GCM_TAG_SIZE);
        check_lengths(nonce, body_len, GCM_MAX_PLAINTEXT_SIZE)?;
        validate::authentication(ciphertext.len() >= GCM_TAG_SIZE, "GCM")?;

        let (body, received_tag) = ciphertext.split_at(body_len);

        let j0 = Self::initial_counter(nonce);
        let expected_tag = self.compute_tag(&j0, aad, body)?;

        let tags_match = barrier::with_barriers(|| ct_eq(expected_tag.as_ref(), received_tag));
        validate::authentication(tags_match, "GCM")?;

        let mut plaintext = body.to_vec();
        self.apply_keystream(&j0, &mut plaintext)?;
        Ok(plaintext)
    }

    /// Typed variant of [`seal`](Self::seal) with an optional AAD
    pub fn encrypt<const N: usize>(
        &self,
        nonce: &Nonce<N>,
        plaintext: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Vec<u8>>
    where
        Nonce<N>: AesGcmCompatible,
    {
        self.seal(nonce.as_ref(), aad.unwrap_or(&[]), plaintext)
    }

    /// Typed variant of [`open`](Self::open) with an optional AAD
    pub fn decrypt<const N: usize>(
        &self,
        nonce: &Nonce<N>,
        ciphertext: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Vec<u8>>
    where
        Nonce<N>: AesGcmCompatible,
    {
        self.open(nonce.as_ref(), aad.unwrap_or(&[]), ciphertext)
    }

    /// `J0 = nonce || 0^31 || 1`
    fn initial_counter(nonce: &[u8]) -> [u8; AES_BLOCK_SIZE] {
        let mut j0 = [0u8; AES_BLOCK_SIZE];
        j0[..GCM_NONCE_SIZE].copy_from_slice(nonce);
        j0[AES_BLOCK_SIZE - 1] = 1;
        j0
    }

    /// Increments the rightmost 32 bits modulo 2^32
    fn inc32(block: &mut [u8; AES_BLOCK_SIZE]) {
        let ctr = BigEndian::read_u32(&block[12..]).wrapping_add(1);
        BigEndian::write_u32(&mut block[12..], ctr);
    }

    /// XORs `data` with `E_K(inc32^i(J0))` for i = 1, 2, ...
    fn apply_keystream(&self, j0: &[u8; AES_BLOCK_SIZE], data: &mut [u8]) -> Result<()> {
        let mut counter = *j0;
        let mut keystream = Zeroizing::new([0u8; AES_BLOCK_SIZE]);

        for chunk in data.chunks_mut(AES_BLOCK_SIZE) {
            Self::inc32(&mut counter);
            keystream.copy_from_slice(&counter);
            self.cipher.encrypt_block(keystream.as_mut())?;

            for (byte, k) in chunk.iter_mut().zip(keystream.iter()) {
                *byte ^= k;
            }
        }

        Ok(())
    }

    /// `tag = GHASH_H(aad, ciphertext) XOR E_K(J0)`
    fn compute_tag(
        &self,
        j0: &[u8; AES_BLOCK_SIZE],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<[u8; GCM_TAG_SIZE]>> {
        let mut h = [0u8; AES_BLOCK_SIZE];
        h.copy_from_slice(self.h.as_slice());
        let s = process_ghash(&h, aad, ciphertext);
        h.zeroize();
        let mut tag = Zeroizing::new(s?);

        let mut mask = Zeroizing::new(*j0);
        self.cipher.encrypt_block(mask.as_mut())?;

        for (t, m) in tag.iter_mut().zip(mask.iter()) {
            *t ^= m;
        }

        Ok(tag)
    }
}
