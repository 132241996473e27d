//! Error handling for symmetric operations
//!
//! The high-level layer shares the workspace error taxonomy with the
//! primitives, so nothing needs converting on the way up. Errors raised by
//! the generic GCM core are relabelled with the concrete algorithm name.

pub use cryptolib_api::error::{validate, Error, Result, ResultExt};
