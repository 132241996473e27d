//! Validation utilities
//!
//! Each helper maps one kind of precondition onto the matching error
//! variant so call sites read as a list of checks.

use super::{Error, Result};

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::param(name, reason));
    }
    Ok(())
}

/// Validate a key length against the single size an algorithm accepts
#[inline(always)]
pub fn key_length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidKeyLength { context, actual });
    }
    Ok(())
}

/// Validate a block length
#[inline(always)]
pub fn block_length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidBlockLength {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate that a length is a whole number of blocks
#[inline(always)]
pub fn block_aligned(context: &'static str, actual: usize, block_size: usize) -> Result<()> {
    if actual % block_size != 0 {
        return Err(Error::InvalidBlockLength {
            context,
            expected: (actual / block_size + 1) * block_size,
            actual,
        });
    }
    Ok(())
}

/// Validate a nonce or IV length
#[inline(always)]
pub fn nonce_length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::NonceLengthError {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate the exact length of a non-secret buffer
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidLength {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate a minimum length
#[inline(always)]
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    if actual < min {
        return Err(Error::InvalidLength {
            context,
            expected: min,
            actual,
        });
    }
    Ok(())
}

/// Validate that a message fits the counter space of a mode
#[inline(always)]
pub fn input_size(context: &'static str, actual: u64, max: u64) -> Result<()> {
    if actual > max {
        return Err(Error::PlaintextTooLarge {
            context,
            max,
            actual,
        });
    }
    Ok(())
}

/// Validate a requested KDF output length
#[inline(always)]
pub fn output_size(context: &'static str, requested: usize, max: usize) -> Result<()> {
    if requested > max {
        return Err(Error::OutputTooLarge {
            context,
            max,
            requested,
        });
    }
    Ok(())
}

/// Validate authentication
#[inline(always)]
pub fn authentication(is_valid: bool, context: &'static str) -> Result<()> {
    if !is_valid {
        return Err(Error::AuthenticationFailure { context });
    }
    Ok(())
}

/// Validate that key material is still live
#[inline(always)]
pub fn not_revoked(revoked: bool, context: &'static str) -> Result<()> {
    if revoked {
        return Err(Error::UseAfterRevoke { context });
    }
    Ok(())
}
