//! Output Feedback (OFB) mode
//!
//! The keystream is the IV enciphered repeatedly, independent of the data.
//! Encryption and decryption are the same operation.

use zeroize::Zeroizing;

use super::super::BlockCipher;
use super::xor_in_place;
use crate::error::{validate, Result};

/// OFB mode over any block cipher
pub struct Ofb<B: BlockCipher> {
    cipher: B,
    iv: Vec<u8>,
}

impl<B: BlockCipher> Ofb<B> {
    /// Creates an OFB instance; the IV must be exactly one block long
    pub fn new(cipher: B, iv: &[u8]) -> Result<Self> {
        validate::nonce_length("OFB IV", iv.len(), B::block_size())?;
        Ok(Self {
            cipher,
            iv: iv.to_vec(),
        })
    }

    /// XORs `data` with the keystream in place
    pub fn apply_keystream(&self, data: &mut [u8]) -> Result<()> {
        let mut register = Zeroizing::new(self.iv.clone());
        for chunk in data.chunks_mut(B::block_size()) {
            self.cipher.encrypt_block(&mut register)?;
            xor_in_place(chunk, &register);
        }
        Ok(())
    }

    /// Encrypts a message of any length
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut out = plaintext.to_vec();
        self.apply_keystream(&mut out)?;
        Ok(out)
    }

    /// Decrypts a message of any length
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt(ciphertext)
    }
}
