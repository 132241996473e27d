//! Internal utilities for the cryptolib library
//!
//! Not part of the public API. The constant-time helpers here back tag
//! verification, secret equality and branch-free selection in the
//! higher-level crates.

#![forbid(unsafe_code)]

pub mod constant_time;

pub use constant_time::{ct_eq, ct_mask, ct_select, ct_select_bytes};
