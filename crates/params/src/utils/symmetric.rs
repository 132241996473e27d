//! Constants for symmetric encryption algorithms

/// AES-128 key size in bytes
pub const AES128_KEY_SIZE: usize = 16;

/// AES-256 key size in bytes
pub const AES256_KEY_SIZE: usize = 32;

/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// GCM nonce size in bytes (96 bits)
pub const GCM_NONCE_SIZE: usize = 12;

/// GCM authentication tag size in bytes (128 bits)
pub const GCM_TAG_SIZE: usize = 16;

/// Largest plaintext a single GCM invocation may process: (2^32 - 2) blocks.
///
/// Expressed as `u64` so the bound is representable on 32-bit targets.
pub const GCM_MAX_PLAINTEXT_SIZE: u64 = ((1u64 << 32) - 2) * AES_BLOCK_SIZE as u64;

/// Size of the fixed field of a deterministic GCM nonce
pub const GCM_NONCE_FIXED_SIZE: usize = 4;

/// TEA key size in bytes
pub const TEA_KEY_SIZE: usize = 16;

/// TEA block size in bytes
pub const TEA_BLOCK_SIZE: usize = 8;

/// Number of TEA cycles (each cycle is two Feistel rounds)
pub const TEA_CYCLES: u32 = 32;
