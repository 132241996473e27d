//! Key derivation with HKDF-SHA-256
//!
//! [`KeyDeriver`] wraps the HKDF primitive with default salt and info
//! parameters and hands out [`KeyMaterial`] directly.
//!
//! # Example
//!
//! ```
//! use cryptolib_symmetric::kdf::KeyDeriver;
//! use cryptolib_symmetric::keys::KeySize;
//!
//! # fn main() -> cryptolib_symmetric::Result<()> {
//! let deriver = KeyDeriver::new();
//! let material = deriver.derive_key(b"master secret", Some(b"salt"), Some(b"aead"), KeySize::Aes256)?;
//! assert_eq!(material.context(), b"aead");
//! # Ok(())
//! # }
//! ```

use tracing::debug;
use zeroize::Zeroizing;

use cryptolib_algorithms::hash::Sha256;
use cryptolib_algorithms::kdf::{Hkdf, HkdfParams, KeyDerivationFunction, ParamProvider};

use crate::error::Result;
use crate::keys::{Key, KeyMaterial, KeySize};

const ALGORITHM: &str = "HKDF-SHA-256";

/// HKDF-SHA-256 with optional default salt and info
#[derive(Clone)]
pub struct KeyDeriver {
    hkdf: Hkdf<Sha256>,
}

impl core::fmt::Debug for KeyDeriver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyDeriver")
            .field("algorithm", &ALGORITHM)
            .field("params", self.params())
            .finish()
    }
}

impl Default for KeyDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDeriver {
    /// Creates a deriver with no default salt or info
    pub fn new() -> Self {
        Self {
            hkdf: Hkdf::new(),
        }
    }

    /// Creates a deriver whose salt and info fall back to `params`
    pub fn with_params(params: HkdfParams) -> Self {
        Self {
            hkdf: Hkdf::with_params(params),
        }
    }

    /// Default parameters in effect
    pub fn params(&self) -> &HkdfParams {
        self.hkdf.params()
    }

    /// Largest output a single derivation can produce (255 × 32 bytes)
    pub fn max_output_size() -> usize {
        Hkdf::<Sha256>::max_output_size()
    }

    /// Derives `output_length` bytes from `master_secret`
    ///
    /// `None` for salt or info selects the configured default. Requests
    /// above [`max_output_size`](Self::max_output_size) fail with
    /// `OutputTooLarge` before any hashing.
    pub fn derive(
        &self,
        master_secret: &[u8],
        salt: Option<&[u8]>,
        info: Option<&[u8]>,
        output_length: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let okm = self
            .hkdf
            .derive_key(master_secret, salt, info, output_length)?;
        debug!(algorithm = ALGORITHM, output_length, "derived key bytes");
        Ok(okm)
    }

    /// Derives key material of the given size
    ///
    /// The info string that was applied becomes the material's context.
    pub fn derive_key(
        &self,
        master_secret: &[u8],
        salt: Option<&[u8]>,
        info: Option<&[u8]>,
        size: KeySize,
    ) -> Result<KeyMaterial> {
        let okm = self.derive(master_secret, salt, info, size.len())?;
        let context = info
            .or_else(|| self.params().info.as_deref().map(Vec::as_slice))
            .unwrap_or(&[]);
        Ok(KeyMaterial::new(Key::from_slice(&okm)?, context))
    }
}

/// One-shot HKDF-SHA-256 derivation
///
/// An empty `salt` is equivalent to a string of 32 zero bytes.
pub fn derive(
    master_secret: &[u8],
    salt: &[u8],
    info: &[u8],
    output_length: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    KeyDeriver::new().derive(master_secret, Some(salt), Some(info), output_length)
}
