//! Tiny Encryption Algorithm (Wheeler & Needham, 1994)
//!
//! A 64-bit block cipher with a 128-bit key built only from additions,
//! shifts and XORs, so its running time is independent of key and data.
//! Kept for interoperability with legacy formats; prefer AES for new designs.

use byteorder::{BigEndian, ByteOrder};
use cryptolib_params::utils::symmetric::{TEA_BLOCK_SIZE, TEA_CYCLES, TEA_KEY_SIZE};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{BlockCipher, CipherAlgorithm};
use crate::error::{validate, Result};
use crate::types::SecretBytes;

const DELTA: u32 = 0x9e37_79b9;

/// Type-level constants for TEA
pub enum TeaAlgorithm {}

impl CipherAlgorithm for TeaAlgorithm {
    const KEY_SIZE: usize = TEA_KEY_SIZE;
    const BLOCK_SIZE: usize = TEA_BLOCK_SIZE;

    fn name() -> &'static str {
        "TEA"
    }
}

/// TEA block cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Tea {
    key: [u32; 4],
}

impl Tea {
    fn split(block: &[u8]) -> (u32, u32) {
        (
            BigEndian::read_u32(&block[..4]),
            BigEndian::read_u32(&block[4..]),
        )
    }

    fn join(block: &mut [u8], v0: u32, v1: u32) {
        BigEndian::write_u32(&mut block[..4], v0);
        BigEndian::write_u32(&mut block[4..], v1);
    }
}

impl BlockCipher for Tea {
    type Algorithm = TeaAlgorithm;
    type Key = SecretBytes<TEA_KEY_SIZE>;

    fn new(key: &Self::Key) -> Self {
        let mut words = [0u32; 4];
        BigEndian::read_u32_into(key.as_ref(), &mut words);
        Tea { key: words }
    }

    fn from_slice(key: &[u8]) -> Result<Self> {
        validate::key_length("TEA", key.len(), TEA_KEY_SIZE)?;
        let key = SecretBytes::<TEA_KEY_SIZE>::from_slice(key)?;
        Ok(Self::new(&key))
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::block_length("TEA block", block.len(), TEA_BLOCK_SIZE)?;

        let [k0, k1, k2, k3] = self.key;
        let (mut v0, mut v1) = Self::split(block);
        let mut sum = 0u32;
        for _ in 0..TEA_CYCLES {
            sum = sum.wrapping_add(DELTA);
            v0 = v0.wrapping_add(
                (v1 << 4).wrapping_add(k0) ^ v1.wrapping_add(sum) ^ (v1 >> 5).wrapping_add(k1),
            );
            v1 = v1.wrapping_add(
                (v0 << 4).wrapping_add(k2) ^ v0.wrapping_add(sum) ^ (v0 >> 5).wrapping_add(k3),
            );
        }
        Self::join(block, v0, v1);
        Ok(())
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::block_length("TEA block", block.len(), TEA_BLOCK_SIZE)?;

        let [k0, k1, k2, k3] = self.key;
        let (mut v0, mut v1) = Self::split(block);
        let mut sum = DELTA.wrapping_mul(TEA_CYCLES);
        for _ in 0..TEA_CYCLES {
            v1 = v1.wrapping_sub(
                (v0 << 4).wrapping_add(k2) ^ v0.wrapping_add(sum) ^ (v0 >> 5).wrapping_add(k3),
            );
            v0 = v0.wrapping_sub(
                (v1 << 4).wrapping_add(k0) ^ v1.wrapping_add(sum) ^ (v1 >> 5).wrapping_add(k1),
            );
            sum = sum.wrapping_sub(DELTA);
        }
        Self::join(block, v0, v1);
        Ok(())
    }

    fn generate_key<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Key {
        SecretBytes::random(rng)
    }
}
