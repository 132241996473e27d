//! Cipher Feedback (CFB) mode with full-block feedback
//!
//! The previous ciphertext block is enciphered to produce the next keystream
//! block. A trailing partial block is allowed.

use zeroize::Zeroizing;

use super::super::BlockCipher;
use super::xor_in_place;
use crate::error::{validate, Result};

/// CFB mode over any block cipher
pub struct Cfb<B: BlockCipher> {
    cipher: B,
    iv: Vec<u8>,
}

impl<B: BlockCipher> Cfb<B> {
    /// Creates a CFB instance; the IV must be exactly one block long
    pub fn new(cipher: B, iv: &[u8]) -> Result<Self> {
        validate::nonce_length("CFB IV", iv.len(), B::block_size())?;
        Ok(Self {
            cipher,
            iv: iv.to_vec(),
        })
    }

    /// Encrypts a message of any length
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut register = Zeroizing::new(self.iv.clone());
        let mut out = plaintext.to_vec();
        for chunk in out.chunks_mut(B::block_size()) {
            self.cipher.encrypt_block(&mut register)?;
            xor_in_place(chunk, &register);
            register[..chunk.len()].copy_from_slice(chunk);
        }
        Ok(out)
    }

    /// Decrypts a message of any length
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let mut register = Zeroizing::new(self.iv.clone());
        let mut out = Zeroizing::new(ciphertext.to_vec());
        for (chunk, ct_chunk) in out
            .chunks_mut(B::block_size())
            .zip(ciphertext.chunks(B::block_size()))
        {
            self.cipher.encrypt_block(&mut register)?;
            xor_in_place(chunk, &register);
            register[..ct_chunk.len()].copy_from_slice(ct_chunk);
        }
        Ok(core::mem::take(&mut *out))
    }
}
