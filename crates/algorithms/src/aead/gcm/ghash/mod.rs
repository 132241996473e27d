//! GHASH universal hash for GCM (NIST SP 800-38D, section 6.4)
//!
//! Multiplication in GF(2^128) runs a fixed 128 iterations and replaces every
//! data-dependent branch with a mask, so timing does not depend on the hash
//! key or on the data being authenticated.

use byteorder::{BigEndian, ByteOrder};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Result;
use cryptolib_params::utils::symmetric::AES_BLOCK_SIZE;

/// Reduction constant `R = 11100001 || 0^120`
const R: u128 = 0xE1 << 120;

/// Incremental GHASH state
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct GHash {
    h: u128,
    y: u128,
}

impl GHash {
    /// Creates a GHASH instance keyed with `H = E_K(0^128)`
    pub fn new(h: &[u8; AES_BLOCK_SIZE]) -> Self {
        Self {
            h: BigEndian::read_u128(h),
            y: 0,
        }
    }

    /// Absorbs `data`, zero-padding the final partial block of this call
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        for chunk in data.chunks(AES_BLOCK_SIZE) {
            let mut block = [0u8; AES_BLOCK_SIZE];
            block[..chunk.len()].copy_from_slice(chunk);
            self.y = gf_mul(self.y ^ BigEndian::read_u128(&block), self.h);
            block.zeroize();
        }
        self
    }

    /// Absorbs the length block `[len(A)]_64 || [len(C)]_64`, lengths in bytes
    pub fn update_lengths(&mut self, aad_len: u64, ciphertext_len: u64) -> &mut Self {
        let bits = ((aad_len.wrapping_mul(8) as u128) << 64) | ciphertext_len.wrapping_mul(8) as u128;
        self.y = gf_mul(self.y ^ bits, self.h);
        self
    }

    /// Returns the current hash value
    pub fn finalize(self) -> [u8; AES_BLOCK_SIZE] {
        let mut out = [0u8; AES_BLOCK_SIZE];
        BigEndian::write_u128(&mut out, self.y);
        out
    }

    /// Multiplies two field elements given in GCM bit order
    pub fn gf_multiply(x: &[u8; AES_BLOCK_SIZE], y: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
        let mut out = [0u8; AES_BLOCK_SIZE];
        BigEndian::write_u128(
            &mut out,
            gf_mul(BigEndian::read_u128(x), BigEndian::read_u128(y)),
        );
        out
    }
}

/// Algorithm 1 of SP 800-38D with masks in place of branches
#[inline]
fn gf_mul(x: u128, y: u128) -> u128 {
    let mut z = 0u128;
    let mut v = y;

    for i in 0..128 {
        let bit = (x >> (127 - i)) & 1;
        z ^= v & bit.wrapping_neg();

        let lsb = v & 1;
        v = (v >> 1) ^ (R & lsb.wrapping_neg());
    }

    z
}

/// Computes `GHASH_H(A || pad || C || pad || len(A) || len(C))`
pub fn process_ghash(
    h: &[u8; AES_BLOCK_SIZE],
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<[u8; AES_BLOCK_SIZE]> {
    let mut ghash = GHash::new(h);
    ghash.update(aad);
    ghash.update(ciphertext);
    ghash.update_lengths(aad.len() as u64, ciphertext.len() as u64);
    Ok(ghash.finalize())
}
