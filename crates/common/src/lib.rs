//! Common implementations and shared functionality for the cryptolib library
//!
//! This crate provides the secret-handling building blocks used across the
//! cryptolib crates.

#![forbid(unsafe_code)]

pub mod security;

// Re-export core security types
pub use security::{EphemeralSecret, SecretBuffer, ZeroizeGuard};

// Re-export memory barrier utilities
pub use security::memory::barrier;
