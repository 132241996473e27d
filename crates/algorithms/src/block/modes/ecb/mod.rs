//! Electronic Codebook (ECB) mode
//!
//! Each block is enciphered independently, so equal plaintext blocks give
//! equal ciphertext blocks. Only suitable for single-block payloads such as
//! key wrapping inputs or test vectors.

use zeroize::Zeroizing;

use super::super::BlockCipher;
use crate::error::{validate, Result};

/// ECB mode over any block cipher
pub struct Ecb<B: BlockCipher> {
    cipher: B,
}

impl<B: BlockCipher> Ecb<B> {
    /// Wraps a keyed block cipher
    pub fn new(cipher: B) -> Self {
        Self { cipher }
    }

    /// Encrypts a block-aligned message
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        validate::block_aligned("ECB plaintext", plaintext.len(), B::block_size())?;

        let mut out = plaintext.to_vec();
        for block in out.chunks_exact_mut(B::block_size()) {
            self.cipher.encrypt_block(block)?;
        }
        Ok(out)
    }

    /// Decrypts a block-aligned message
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        validate::block_aligned("ECB ciphertext", ciphertext.len(), B::block_size())?;

        let mut out = Zeroizing::new(ciphertext.to_vec());
        for block in out.chunks_exact_mut(B::block_size()) {
            self.cipher.decrypt_block(block)?;
        }
        Ok(core::mem::take(&mut *out))
    }
}
