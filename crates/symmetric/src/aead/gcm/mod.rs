//! AES-GCM authenticated encryption
//!
//! High-level AES-GCM bound to [`KeyMaterial`]. Each instance expands the
//! key once and can then seal and open any number of messages; every call
//! needs a fresh nonce under the same key.
//!
//! # Examples
//!
//! ```
//! use cryptolib_symmetric::{Aead, Aes256Gcm, KeyMaterial, KeySize, SymmetricCipher};
//!
//! # fn main() -> cryptolib_symmetric::Result<()> {
//! let key = KeyMaterial::generate(KeySize::Aes256);
//! let cipher = Aes256Gcm::new(&key)?;
//!
//! let nonce = Aes256Gcm::generate_nonce();
//! let ciphertext = cipher.encrypt(&nonce, b"Secret message", Some(b"header"))?;
//! let plaintext = cipher.decrypt(&nonce, &ciphertext, Some(b"header"))?;
//! assert_eq!(plaintext, b"Secret message");
//! # Ok(())
//! # }
//! ```
//!
//! The free functions [`seal`] and [`open`] take raw key and nonce bytes
//! and pick AES-128 or AES-256 from the key length.

use tracing::{debug, warn};

use cryptolib_algorithms::aead::Gcm;
use cryptolib_algorithms::block::{Aes128, Aes256, BlockCipher};
use cryptolib_params::utils::symmetric::{GCM_MAX_PLAINTEXT_SIZE, GCM_NONCE_SIZE, GCM_TAG_SIZE};

use crate::cipher::{Aead, SymmetricCipher};
use crate::error::{validate, Error, Result};
use crate::keys::{Key, KeyMaterial, KeySize};

pub mod types;

pub use types::{AesCiphertextPackage, GcmNonce};

/// Relabels a core GCM error with the concrete algorithm name
fn relabel(algorithm: &'static str, err: Error) -> Error {
    if let Error::AuthenticationFailure { .. } = err {
        warn!(algorithm, "authentication failed");
    }
    err.with_context(algorithm)
}

macro_rules! aes_gcm_cipher {
    ($name:ident, $cipher:ty, $size:expr, $label:literal) => {
        #[doc = concat!($label, " bound to one key")]
        #[derive(Clone)]
        pub struct $name {
            gcm: Gcm<$cipher>,
        }

        impl $name {
            /// Builds an instance directly from a key
            ///
            /// Fails with `InvalidKeyLength` if the key has the other size.
            pub fn from_key(key: &Key) -> Result<Self> {
                if key.size() != $size {
                    return Err(Error::InvalidKeyLength {
                        context: $label,
                        actual: key.len(),
                    });
                }
                let cipher = <$cipher>::from_slice(key.as_bytes())?;
                let gcm = Gcm::new(cipher)?;
                debug!(algorithm = $label, "constructed AEAD instance");
                Ok(Self { gcm })
            }

            /// Encrypts `plaintext`, returning `ciphertext || tag`
            pub fn seal(&self, nonce: &GcmNonce, aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
                self.gcm
                    .seal(nonce.as_bytes(), aad, plaintext)
                    .map_err(|e| relabel($label, e))
            }

            /// Verifies and decrypts `ciphertext || tag`
            pub fn open(&self, nonce: &GcmNonce, aad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
                self.gcm
                    .open(nonce.as_bytes(), aad, ciphertext)
                    .map_err(|e| relabel($label, e))
            }

            /// Encrypts under a freshly generated random nonce
            pub fn encrypt_with_random_nonce(
                &self,
                plaintext: &[u8],
                aad: Option<&[u8]>,
            ) -> Result<(Vec<u8>, GcmNonce)> {
                let nonce = Self::generate_nonce();
                let ciphertext = self.encrypt(&nonce, plaintext, aad)?;
                Ok((ciphertext, nonce))
            }

            /// Encrypts into a package carrying its own nonce
            pub fn encrypt_to_package(
                &self,
                plaintext: &[u8],
                aad: Option<&[u8]>,
            ) -> Result<AesCiphertextPackage> {
                let (ciphertext, nonce) = self.encrypt_with_random_nonce(plaintext, aad)?;
                Ok(AesCiphertextPackage::new(nonce, ciphertext))
            }

            /// Decrypts a package produced by [`encrypt_to_package`](Self::encrypt_to_package)
            pub fn decrypt_package(
                &self,
                package: &AesCiphertextPackage,
                aad: Option<&[u8]>,
            ) -> Result<Vec<u8>> {
                self.decrypt(&package.nonce, &package.ciphertext, aad)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str($label)
            }
        }

        impl SymmetricCipher for $name {
            fn new(key: &KeyMaterial) -> Result<Self> {
                Self::from_key(key.key()?)
            }

            fn name() -> &'static str {
                $label
            }
        }

        impl Aead for $name {
            type Nonce = GcmNonce;

            fn encrypt(
                &self,
                nonce: &Self::Nonce,
                plaintext: &[u8],
                aad: Option<&[u8]>,
            ) -> Result<Vec<u8>> {
                self.seal(nonce, aad.unwrap_or(&[]), plaintext)
            }

            fn decrypt(
                &self,
                nonce: &Self::Nonce,
                ciphertext: &[u8],
                aad: Option<&[u8]>,
            ) -> Result<Vec<u8>> {
                self.open(nonce, aad.unwrap_or(&[]), ciphertext)
            }

            fn generate_nonce() -> Self::Nonce {
                GcmNonce::generate()
            }
        }
    };
}

aes_gcm_cipher!(Aes128Gcm, Aes128, KeySize::Aes128, "AES-128-GCM");
aes_gcm_cipher!(Aes256Gcm, Aes256, KeySize::Aes256, "AES-256-GCM");

/// AES-GCM with the key size chosen at runtime
#[derive(Clone, Debug)]
pub enum AesGcm {
    /// 128-bit key
    Aes128(Aes128Gcm),
    /// 256-bit key
    Aes256(Aes256Gcm),
}

impl AesGcm {
    /// Builds the variant matching the key size
    pub fn from_key(key: &Key) -> Result<Self> {
        match key.size() {
            KeySize::Aes128 => Ok(AesGcm::Aes128(Aes128Gcm::from_key(key)?)),
            KeySize::Aes256 => Ok(AesGcm::Aes256(Aes256Gcm::from_key(key)?)),
        }
    }

    /// Builds the variant matching the key material, unless revoked
    pub fn new(key: &KeyMaterial) -> Result<Self> {
        Self::from_key(key.key()?)
    }

    /// Algorithm name of the selected variant
    pub fn name(&self) -> &'static str {
        match self {
            AesGcm::Aes128(_) => Aes128Gcm::name(),
            AesGcm::Aes256(_) => Aes256Gcm::name(),
        }
    }

    /// Encrypts `plaintext`, returning `ciphertext || tag`
    pub fn seal(&self, nonce: &GcmNonce, aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        match self {
            AesGcm::Aes128(c) => c.seal(nonce, aad, plaintext),
            AesGcm::Aes256(c) => c.seal(nonce, aad, plaintext),
        }
    }

    /// Verifies and decrypts `ciphertext || tag`
    pub fn open(&self, nonce: &GcmNonce, aad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        match self {
            AesGcm::Aes128(c) => c.open(nonce, aad, ciphertext),
            AesGcm::Aes256(c) => c.open(nonce, aad, ciphertext),
        }
    }
}

/// Checks that must fail before any key schedule or cipher work happens
fn precheck(nonce: &[u8], data_len: usize, max: u64) -> Result<GcmNonce> {
    validate::nonce_length("AES-GCM", nonce.len(), GCM_NONCE_SIZE)?;
    validate::input_size("AES-GCM", data_len as u64, max)?;
    GcmNonce::from_slice(nonce)
}

/// Encrypts with a raw 16- or 32-byte key and a 12-byte nonce
///
/// Returns `ciphertext || tag`, exactly `plaintext.len() + 16` bytes.
pub fn seal(key: &[u8], nonce: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let nonce = precheck(nonce, plaintext.len(), GCM_MAX_PLAINTEXT_SIZE)?;
    let key = Key::from_slice(key)?;
    AesGcm::from_key(&key)?.seal(&nonce, aad, plaintext)
}

/// Verifies and decrypts with a raw key and nonce
///
/// Fails with `AuthenticationFailure`, releasing nothing, if the input was
/// modified or produced under a different key, nonce or AAD.
pub fn open(key: &[u8], nonce: &[u8], aad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let nonce = precheck(
        nonce,
        ciphertext.len().saturating_sub(GCM_TAG_SIZE),
        GCM_MAX_PLAINTEXT_SIZE,
    )?;
    let key = Key::from_slice(key)?;
    AesGcm::from_key(&key)?.open(&nonce, aad, ciphertext)
}
