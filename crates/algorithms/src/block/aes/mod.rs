//! AES block cipher (FIPS 197) for 128- and 256-bit keys
//!
//! ## Constant-Time Guarantees
//!
//! - The S-box is computed arithmetically (inversion in GF(2^8) followed by
//!   the affine map) instead of being read from a table
//! - Field doubling uses a mask derived from the high bit, never a branch
//! - Round keys live in a [`SecretBuffer`] and are wiped on drop
//!
//! Round functions are shared between key sizes; only the key schedule and
//! the number of rounds differ.

use byteorder::{BigEndian, ByteOrder};
use cryptolib_common::security::barrier::compiler_fence_seq_cst;
use cryptolib_common::security::SecretBuffer;
use cryptolib_params::utils::symmetric::{AES128_KEY_SIZE, AES256_KEY_SIZE, AES_BLOCK_SIZE};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{BlockCipher, CipherAlgorithm};
use crate::error::{validate, Error, Result};
use crate::types::SecretBytes;

const AES128_ROUNDS: usize = 10;
const AES256_ROUNDS: usize = 14;

/// Round constants for key expansion
const RCON: [u32; 11] = [
    0x00000000, 0x01000000, 0x02000000, 0x04000000, 0x08000000, 0x10000000, 0x20000000,
    0x40000000, 0x80000000, 0x1b000000, 0x36000000,
];

/// Multiply by x in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1
#[inline(always)]
fn xtime(a: u8) -> u8 {
    (a << 1) ^ ((a >> 7).wrapping_neg() & 0x1B)
}

/// Multiply two field elements with a fixed eight-step loop
#[inline(always)]
fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut p = 0u8;
    for _ in 0..8 {
        p ^= a & (b & 1).wrapping_neg();
        a = xtime(a);
        b >>= 1;
    }
    p
}

/// x^254, which is x^-1 for non-zero x and 0 for x = 0
#[inline(always)]
fn gf_inv(x: u8) -> u8 {
    let x2 = gf_mul(x, x);
    let x4 = gf_mul(x2, x2);
    let x8 = gf_mul(x4, x4);
    let x16 = gf_mul(x8, x8);
    let x32 = gf_mul(x16, x16);
    let x64 = gf_mul(x32, x32);
    let x128 = gf_mul(x64, x64);

    let mut y = gf_mul(x128, x64);
    y = gf_mul(y, x32);
    y = gf_mul(y, x16);
    y = gf_mul(y, x8);
    y = gf_mul(y, x4);
    gf_mul(y, x2)
}

#[inline(always)]
fn sbox(x: u8) -> u8 {
    let i = gf_inv(x);
    i ^ i.rotate_left(1) ^ i.rotate_left(2) ^ i.rotate_left(3) ^ i.rotate_left(4) ^ 0x63
}

#[inline(always)]
fn inv_sbox(x: u8) -> u8 {
    let y = x ^ 0x63;
    gf_inv(y.rotate_left(1) ^ y.rotate_left(3) ^ y.rotate_left(6))
}

#[inline(always)]
fn sub_word(word: u32) -> u32 {
    let mut bytes = [0u8; 4];
    BigEndian::write_u32(&mut bytes, word);
    for b in bytes.iter_mut() {
        *b = sbox(*b);
    }
    BigEndian::read_u32(&bytes)
}

/// FIPS 197 key expansion into `out`, which holds `4 * (rounds + 1)` words
/// serialized as bytes.
fn expand_key_into(key: &[u8], out: &mut [u8]) {
    let nk = key.len() / 4;
    let total = out.len() / 4;
    let mut words = [0u32; 4 * (AES256_ROUNDS + 1)];

    for (i, chunk) in key.chunks_exact(4).enumerate() {
        words[i] = BigEndian::read_u32(chunk);
    }

    for i in nk..total {
        let mut temp = words[i - 1];
        if i % nk == 0 {
            temp = sub_word(temp.rotate_left(8)) ^ RCON[i / nk];
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        words[i] = words[i - nk] ^ temp;
    }

    for (chunk, word) in out.chunks_exact_mut(4).zip(words.iter()) {
        BigEndian::write_u32(chunk, *word);
    }
    words.zeroize();
}

fn sub_bytes(state: &mut [u8; 16]) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
    compiler_fence_seq_cst();
}

fn inv_sub_bytes(state: &mut [u8; 16]) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
    compiler_fence_seq_cst();
}

/// State is column-major: byte `r + 4c` is row `r`, column `c`
fn shift_rows(state: &mut [u8; 16]) {
    let t = *state;
    for c in 0..4 {
        for r in 1..4 {
            state[r + 4 * c] = t[r + 4 * ((c + r) % 4)];
        }
    }
}

fn inv_shift_rows(state: &mut [u8; 16]) {
    let t = *state;
    for c in 0..4 {
        for r in 1..4 {
            state[r + 4 * ((c + r) % 4)] = t[r + 4 * c];
        }
    }
}

fn mix_columns(state: &mut [u8; 16]) {
    for col in state.chunks_exact_mut(4) {
        let (s0, s1, s2, s3) = (col[0], col[1], col[2], col[3]);
        col[0] = xtime(s0) ^ xtime(s1) ^ s1 ^ s2 ^ s3;
        col[1] = s0 ^ xtime(s1) ^ xtime(s2) ^ s2 ^ s3;
        col[2] = s0 ^ s1 ^ xtime(s2) ^ xtime(s3) ^ s3;
        col[3] = xtime(s0) ^ s0 ^ s1 ^ s2 ^ xtime(s3);
    }
}

fn inv_mix_columns(state: &mut [u8; 16]) {
    for col in state.chunks_exact_mut(4) {
        let (s0, s1, s2, s3) = (col[0], col[1], col[2], col[3]);
        col[0] = gf_mul(s0, 14) ^ gf_mul(s1, 11) ^ gf_mul(s2, 13) ^ gf_mul(s3, 9);
        col[1] = gf_mul(s0, 9) ^ gf_mul(s1, 14) ^ gf_mul(s2, 11) ^ gf_mul(s3, 13);
        col[2] = gf_mul(s0, 13) ^ gf_mul(s1, 9) ^ gf_mul(s2, 14) ^ gf_mul(s3, 11);
        col[3] = gf_mul(s0, 11) ^ gf_mul(s1, 13) ^ gf_mul(s2, 9) ^ gf_mul(s3, 14);
    }
}

#[inline(always)]
fn add_round_key(state: &mut [u8; 16], round_key: &[u8]) {
    for (s, k) in state.iter_mut().zip(round_key.iter()) {
        *s ^= k;
    }
}

/// Runs the full cipher over one block with an expanded key of `rounds + 1`
/// round keys.
fn encrypt_with(round_keys: &[u8], rounds: usize, block: &mut [u8]) -> Result<()> {
    validate::block_length("AES block", block.len(), AES_BLOCK_SIZE)?;

    let mut state = [0u8; 16];
    state.copy_from_slice(block);

    add_round_key(&mut state, &round_keys[..16]);
    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, &round_keys[round * 16..(round + 1) * 16]);
    }
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, &round_keys[rounds * 16..(rounds + 1) * 16]);

    block.copy_from_slice(&state);
    state.zeroize();
    Ok(())
}

fn decrypt_with(round_keys: &[u8], rounds: usize, block: &mut [u8]) -> Result<()> {
    validate::block_length("AES block", block.len(), AES_BLOCK_SIZE)?;

    let mut state = [0u8; 16];
    state.copy_from_slice(block);

    add_round_key(&mut state, &round_keys[rounds * 16..(rounds + 1) * 16]);
    for round in (1..rounds).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, &round_keys[round * 16..(round + 1) * 16]);
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, &round_keys[..16]);

    block.copy_from_slice(&state);
    state.zeroize();
    Ok(())
}

/// Type-level constants for AES-128
pub enum Aes128Algorithm {}

impl CipherAlgorithm for Aes128Algorithm {
    const KEY_SIZE: usize = AES128_KEY_SIZE;
    const BLOCK_SIZE: usize = AES_BLOCK_SIZE;

    fn name() -> &'static str {
        "AES-128"
    }
}

/// Type-level constants for AES-256
pub enum Aes256Algorithm {}

impl CipherAlgorithm for Aes256Algorithm {
    const KEY_SIZE: usize = AES256_KEY_SIZE;
    const BLOCK_SIZE: usize = AES_BLOCK_SIZE;

    fn name() -> &'static str {
        "AES-256"
    }
}

/// AES-128 block cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes128 {
    round_keys: SecretBuffer<176>, // 11 round keys x 16 bytes
}

/// AES-256 block cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes256 {
    round_keys: SecretBuffer<240>, // 15 round keys x 16 bytes
}

impl BlockCipher for Aes128 {
    type Algorithm = Aes128Algorithm;
    type Key = SecretBytes<AES128_KEY_SIZE>;

    fn new(key: &Self::Key) -> Self {
        let mut round_keys = SecretBuffer::zeroed();
        expand_key_into(key.as_ref(), round_keys.as_mut_slice());
        Aes128 { round_keys }
    }

    fn from_slice(key: &[u8]) -> Result<Self> {
        validate::key_length("AES-128", key.len(), AES128_KEY_SIZE)?;
        let key = SecretBytes::<AES128_KEY_SIZE>::from_slice(key)?;
        Ok(Self::new(&key))
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        encrypt_with(self.round_keys.as_slice(), AES128_ROUNDS, block)
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        decrypt_with(self.round_keys.as_slice(), AES128_ROUNDS, block)
    }

    fn generate_key<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Key {
        SecretBytes::random(rng)
    }
}

impl BlockCipher for Aes256 {
    type Algorithm = Aes256Algorithm;
    type Key = SecretBytes<AES256_KEY_SIZE>;

    fn new(key: &Self::Key) -> Self {
        let mut round_keys = SecretBuffer::zeroed();
        expand_key_into(key.as_ref(), round_keys.as_mut_slice());
        Aes256 { round_keys }
    }

    fn from_slice(key: &[u8]) -> Result<Self> {
        validate::key_length("AES-256", key.len(), AES256_KEY_SIZE)?;
        let key = SecretBytes::<AES256_KEY_SIZE>::from_slice(key)?;
        Ok(Self::new(&key))
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        encrypt_with(self.round_keys.as_slice(), AES256_ROUNDS, block)
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        decrypt_with(self.round_keys.as_slice(), AES256_ROUNDS, block)
    }

    fn generate_key<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Key {
        SecretBytes::random(rng)
    }
}

/// AES with the key size chosen at runtime
///
/// Accepts exactly 16 or 32 key bytes; every other length fails with
/// `InvalidKeyLength` before any key schedule is computed.
#[derive(Clone)]
pub enum Aes {
    /// 128-bit key, 10 rounds
    Aes128(Aes128),
    /// 256-bit key, 14 rounds
    Aes256(Aes256),
}

impl Aes {
    /// Expands `key` into a cipher instance
    pub fn init(key: &[u8]) -> Result<Self> {
        match key.len() {
            AES128_KEY_SIZE => Ok(Aes::Aes128(Aes128::from_slice(key)?)),
            AES256_KEY_SIZE => Ok(Aes::Aes256(Aes256::from_slice(key)?)),
            actual => Err(Error::InvalidKeyLength {
                context: "AES",
                actual,
            }),
        }
    }

    /// Encrypts one 16-byte block in place
    pub fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        match self {
            Aes::Aes128(c) => c.encrypt_block(block),
            Aes::Aes256(c) => c.encrypt_block(block),
        }
    }

    /// Decrypts one 16-byte block in place
    pub fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        match self {
            Aes::Aes128(c) => c.decrypt_block(block),
            Aes::Aes256(c) => c.decrypt_block(block),
        }
    }

    /// Algorithm name for the selected key size
    pub fn name(&self) -> &'static str {
        match self {
            Aes::Aes128(_) => Aes128Algorithm::name(),
            Aes::Aes256(_) => Aes256Algorithm::name(),
        }
    }

    /// Key size in bytes
    pub fn key_size(&self) -> usize {
        match self {
            Aes::Aes128(_) => AES128_KEY_SIZE,
            Aes::Aes256(_) => AES256_KEY_SIZE,
        }
    }
}

impl core::fmt::Debug for Aes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Aes({})", self.name())
    }
}
