//! Cryptographic hash functions
//!
//! SHA-256 and SHA-512 back HMAC and HKDF. Both are pure ARX constructions
//! with no data-dependent memory access.

pub mod sha2;

pub use sha2::{Sha256, Sha512};

use crate::error::Result;

/// Type-level constants describing a hash algorithm
pub trait HashAlgorithm {
    /// Output size in bytes
    const OUTPUT_SIZE: usize;

    /// Internal block size in bytes
    const BLOCK_SIZE: usize;

    /// Algorithm identifier
    const ALGORITHM_ID: &'static str;
}

/// Trait for streaming hash functions
pub trait HashFunction: Sized + Clone {
    /// The algorithm this hasher implements
    type Algorithm: HashAlgorithm;

    /// Digest type produced by [`finalize`](Self::finalize)
    type Output: AsRef<[u8]> + Clone;

    /// Creates a fresh hasher
    fn new() -> Self;

    /// Absorbs more input
    fn update(&mut self, data: &[u8]) -> Result<&mut Self>;

    /// Produces the digest and wipes the internal state
    ///
    /// The hasher must not be reused afterwards without calling `new`.
    fn finalize(&mut self) -> Result<Self::Output>;

    /// Output size in bytes
    fn output_size() -> usize {
        Self::Algorithm::OUTPUT_SIZE
    }

    /// Block size in bytes
    fn block_size() -> usize {
        Self::Algorithm::BLOCK_SIZE
    }

    /// Algorithm name
    fn name() -> &'static str {
        Self::Algorithm::ALGORITHM_ID
    }

    /// One-shot hash of `data`
    fn digest(data: &[u8]) -> Result<Self::Output> {
        let mut hasher = Self::new();
        hasher.update(data)?;
        hasher.finalize()
    }
}
