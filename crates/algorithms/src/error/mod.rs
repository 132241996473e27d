//! Error handling for cryptographic primitives
//!
//! Primitives share the workspace-wide error taxonomy so a failure keeps its
//! variant all the way up to the caller.

pub use cryptolib_api::error::{validate, Error, Result, ResultExt};
