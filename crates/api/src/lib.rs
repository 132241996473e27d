//! Public API types for the cryptolib library
//!
//! This crate holds the error taxonomy shared by every cryptolib crate and
//! the zeroizing byte containers used to pass secrets across crate
//! boundaries.

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use types::SecretBytes;
