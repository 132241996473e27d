//! Cipher Block Chaining (CBC) mode
//!
//! Each plaintext block is XORed with the previous ciphertext block (the IV
//! for the first one) before encryption. No padding is applied: input must
//! be a whole number of blocks.

use zeroize::Zeroizing;

use super::super::BlockCipher;
use super::xor_in_place;
use crate::error::{validate, Result};

/// CBC mode over any block cipher
pub struct Cbc<B: BlockCipher> {
    cipher: B,
    iv: Vec<u8>,
}

impl<B: BlockCipher> Cbc<B> {
    /// Creates a CBC instance; the IV must be exactly one block long
    pub fn new(cipher: B, iv: &[u8]) -> Result<Self> {
        validate::nonce_length("CBC IV", iv.len(), B::block_size())?;
        Ok(Self {
            cipher,
            iv: iv.to_vec(),
        })
    }

    /// Encrypts a block-aligned message
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let block_size = B::block_size();
        validate::block_aligned("CBC plaintext", plaintext.len(), block_size)?;

        let mut out = plaintext.to_vec();
        let mut prev = self.iv.clone();
        for block in out.chunks_exact_mut(block_size) {
            xor_in_place(block, &prev);
            self.cipher.encrypt_block(block)?;
            prev.copy_from_slice(block);
        }
        Ok(out)
    }

    /// Decrypts a block-aligned message
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let block_size = B::block_size();
        validate::block_aligned("CBC ciphertext", ciphertext.len(), block_size)?;

        let mut out = Zeroizing::new(ciphertext.to_vec());
        let mut prev = self.iv.clone();
        for (block, ct_block) in out
            .chunks_exact_mut(block_size)
            .zip(ciphertext.chunks_exact(block_size))
        {
            self.cipher.decrypt_block(block)?;
            xor_in_place(block, &prev);
            prev.copy_from_slice(ct_block);
        }
        Ok(core::mem::take(&mut *out))
    }
}
