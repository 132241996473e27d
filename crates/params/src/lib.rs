//! Constant values for cryptolib cryptographic operations
//!
//! Sizes are in bytes unless a name says otherwise.

#![forbid(unsafe_code)]

pub mod utils;
