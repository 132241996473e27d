//! Security primitives and memory safety utilities
//!
//! This module provides foundational security types and patterns used throughout
//! cryptolib to ensure proper handling of sensitive cryptographic material.

pub mod memory;
pub mod secret;

// Re-export core security types
pub use secret::{EphemeralSecret, SecretBuffer, ZeroizeGuard};

// Re-export memory barrier utilities
pub use memory::barrier;
