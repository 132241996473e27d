//! Error type definitions for cryptographic operations
//!
//! Every variant carries a static context label plus, where relevant, the
//! public lengths involved. Keys, plaintext, nonces and tags are never
//! captured, so an `Error` can be logged or displayed without leaking
//! secret material.

use thiserror::Error as ThisError;

/// Primary error type for cryptographic operations
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// A key has a length no supported algorithm accepts
    #[error("{context}: invalid key length ({actual} bytes)")]
    InvalidKeyLength {
        /// Operation or algorithm that rejected the key
        context: &'static str,
        /// Length that was supplied
        actual: usize,
    },

    /// A block passed to a block cipher has the wrong size
    #[error("{context}: invalid block length (expected {expected}, got {actual})")]
    InvalidBlockLength {
        /// Operation that rejected the block
        context: &'static str,
        /// Required block length
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// A nonce or IV has the wrong size
    #[error("{context}: invalid nonce length (expected {expected}, got {actual})")]
    NonceLengthError {
        /// Operation that rejected the nonce
        context: &'static str,
        /// Required nonce length
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// A message exceeds the counter space of the mode
    #[error("{context}: input too large (max {max} bytes, got {actual})")]
    PlaintextTooLarge {
        /// Operation that rejected the input
        context: &'static str,
        /// Largest accepted input
        max: u64,
        /// Length that was supplied
        actual: u64,
    },

    /// Tag verification failed; no plaintext was released
    #[error("{context}: authentication failed")]
    AuthenticationFailure {
        /// Algorithm that failed verification
        context: &'static str,
    },

    /// A KDF was asked for more output than it can produce
    #[error("{context}: requested output too large (max {max} bytes, requested {requested})")]
    OutputTooLarge {
        /// KDF that rejected the request
        context: &'static str,
        /// Largest output the KDF can produce
        max: usize,
        /// Requested output length
        requested: usize,
    },

    /// Key material was used after it was revoked
    #[error("{context}: key material used after revocation")]
    UseAfterRevoke {
        /// Operation that was attempted
        context: &'static str,
    },

    /// A deterministic nonce sequence has no fresh values left
    #[error("{context}: nonce space exhausted")]
    NonceSpaceExhausted {
        /// Sequence that ran out
        context: &'static str,
    },

    /// A non-secret buffer (tag, digest, encoded package) has the wrong size
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        /// Buffer that was rejected
        context: &'static str,
        /// Required length
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// An algorithm was configured with an unusable parameter
    #[error("invalid parameter '{context}': {message}")]
    InvalidParameter {
        /// Parameter name
        context: &'static str,
        /// Why the parameter was rejected
        message: &'static str,
    },
}

/// Result type for cryptographic operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context label of an existing error
    ///
    /// Used by high-level wrappers to report the concrete algorithm name
    /// (for example `"AES-256-GCM"`) instead of the generic primitive.
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidKeyLength { actual, .. } => Self::InvalidKeyLength { context, actual },
            Self::InvalidBlockLength { expected, actual, .. } => Self::InvalidBlockLength {
                context,
                expected,
                actual,
            },
            Self::NonceLengthError { expected, actual, .. } => Self::NonceLengthError {
                context,
                expected,
                actual,
            },
            Self::PlaintextTooLarge { max, actual, .. } => Self::PlaintextTooLarge {
                context,
                max,
                actual,
            },
            Self::AuthenticationFailure { .. } => Self::AuthenticationFailure { context },
            Self::OutputTooLarge { max, requested, .. } => Self::OutputTooLarge {
                context,
                max,
                requested,
            },
            Self::UseAfterRevoke { .. } => Self::UseAfterRevoke { context },
            Self::NonceSpaceExhausted { .. } => Self::NonceSpaceExhausted { context },
            Self::InvalidLength { expected, actual, .. } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
        }
    }

    /// The context label carried by this error
    pub fn context(&self) -> &'static str {
        match self {
            Self::InvalidKeyLength { context, .. }
            | Self::InvalidBlockLength { context, .. }
            | Self::NonceLengthError { context, .. }
            | Self::PlaintextTooLarge { context, .. }
            | Self::AuthenticationFailure { context }
            | Self::OutputTooLarge { context, .. }
            | Self::UseAfterRevoke { context }
            | Self::NonceSpaceExhausted { context }
            | Self::InvalidLength { context, .. }
            | Self::InvalidParameter { context, .. } => context,
        }
    }

    /// Shorthand to create an `InvalidParameter` error
    pub fn param(name: &'static str, reason: &'static str) -> Self {
        Self::InvalidParameter {
            context: name,
            message: reason,
        }
    }
}
