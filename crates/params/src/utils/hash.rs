//! Constants for hash functions

/// Output size of SHA-256 in bytes
pub const SHA256_OUTPUT_SIZE: usize = 32;

/// Output size of SHA-512 in bytes
pub const SHA512_OUTPUT_SIZE: usize = 64;

/// Internal block size of SHA-256 in bytes
pub const SHA256_BLOCK_SIZE: usize = 64;

/// Internal block size of SHA-512 in bytes
pub const SHA512_BLOCK_SIZE: usize = 128;

/// HKDF output limit as a multiple of the hash length (RFC 5869 §2.3)
pub const HKDF_MAX_BLOCKS: usize = 255;
