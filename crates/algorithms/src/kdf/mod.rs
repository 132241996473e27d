//! Key derivation functions
//!
//! HKDF (RFC 5869) is the only KDF provided. It is exposed both as static
//! extract/expand/derive functions and through the [`KeyDerivationFunction`]
//! trait with a fluent [`KdfOperation`] builder.
//!
//! ## Example usage
//!
//! ```
//! use cryptolib_algorithms::hash::Sha256;
//! use cryptolib_algorithms::kdf::{Hkdf, KdfOperation, KeyDerivationFunction};
//!
//! let kdf = Hkdf::<Sha256>::new();
//!
//! let key1 = kdf
//!     .derive_key(b"master secret", Some(b"salt"), Some(b"context"), 32)
//!     .unwrap();
//!
//! let key2: [u8; 32] = kdf
//!     .builder()
//!     .with_ikm(b"master secret")
//!     .with_salt(b"salt")
//!     .with_info(b"context")
//!     .derive_array()
//!     .unwrap();
//!
//! assert_eq!(&key1[..], &key2[..]);
//! ```

use zeroize::Zeroizing;

use crate::error::Result;

pub mod hkdf;

pub use hkdf::{Hkdf, HkdfAlgorithm, HkdfOperation, HkdfParams};

/// Marker trait for KDF algorithms
pub trait KdfAlgorithm {
    /// Default output size in bytes
    const DEFAULT_OUTPUT_SIZE: usize;

    /// Static algorithm identifier
    const ALGORITHM_ID: &'static str;

    /// Returns the KDF algorithm name
    fn name() -> String {
        Self::ALGORITHM_ID.to_string()
    }
}

/// Fluent builder for a single derivation
pub trait KdfOperation<'a, A: KdfAlgorithm>: Sized {
    /// Set the input keying material
    fn with_ikm(self, ikm: &'a [u8]) -> Self;

    /// Set the salt
    fn with_salt(self, salt: &'a [u8]) -> Self;

    /// Set the info/context data
    fn with_info(self, info: &'a [u8]) -> Self;

    /// Set the desired output length
    fn with_output_length(self, length: usize) -> Self;

    /// Execute the key derivation
    fn derive(self) -> Result<Zeroizing<Vec<u8>>>;

    /// Execute the key derivation into a fixed-size array
    fn derive_array<const N: usize>(self) -> Result<[u8; N]>;
}

/// Common trait for key derivation functions
pub trait KeyDerivationFunction {
    /// The algorithm this KDF implements
    type Algorithm: KdfAlgorithm;

    /// Creates an instance with default parameters
    fn new() -> Self;

    /// Derives `length` bytes from `input`
    ///
    /// `None` for `salt` or `info` falls back to the instance's configured
    /// defaults, if any.
    fn derive_key(
        &self,
        input: &[u8],
        salt: Option<&[u8]>,
        info: Option<&[u8]>,
        length: usize,
    ) -> Result<Zeroizing<Vec<u8>>>;

    /// Creates a builder for fluent API usage
    fn builder(&self) -> impl KdfOperation<'_, Self::Algorithm>
    where
        Self: Sized;
}

/// Trait for algorithms with configurable parameters
pub trait ParamProvider {
    /// The parameter type associated with this algorithm
    type Params: Clone;

    /// Creates a new instance with the specified parameters
    fn with_params(params: Self::Params) -> Self;

    /// Returns the current parameters
    fn params(&self) -> &Self::Params;

    /// Updates the parameters
    fn set_params(&mut self, params: Self::Params);
}
