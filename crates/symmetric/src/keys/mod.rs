//! Key material and its lifecycle
//!
//! A [`Key`] is 16 or 32 secret bytes that are wiped when dropped and never
//! printed. [`KeyMaterial`] wraps a key with its derivation context and
//! creation time, and can be revoked: revocation wipes the key immediately
//! and every later access fails with `UseAfterRevoke`.
//!
//! [`with_key`] lends a caller-owned raw key buffer to a closure and wipes
//! that buffer on every exit path, including a panic unwinding through the
//! closure.

use core::fmt;
use std::time::SystemTime;

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

use cryptolib_algorithms::hash::Sha256;
use cryptolib_algorithms::kdf::Hkdf;
use cryptolib_algorithms::types::{SecretBuffer, ZeroizeGuard};
use cryptolib_params::utils::symmetric::{AES128_KEY_SIZE, AES256_KEY_SIZE};

use crate::error::{Error, Result};

/// Supported key sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 128-bit key
    Aes128,
    /// 256-bit key
    Aes256,
}

impl KeySize {
    /// Key length in bytes
    pub fn len(self) -> usize {
        match self {
            KeySize::Aes128 => AES128_KEY_SIZE,
            KeySize::Aes256 => AES256_KEY_SIZE,
        }
    }

    /// Key length in bits
    pub fn bits(self) -> usize {
        self.len() * 8
    }

    /// Maps a byte length to a key size
    pub fn from_len(len: usize) -> Result<Self> {
        match len {
            AES128_KEY_SIZE => Ok(KeySize::Aes128),
            AES256_KEY_SIZE => Ok(KeySize::Aes256),
            _ => Err(Error::InvalidKeyLength {
                context: "Key",
                actual: len,
            }),
        }
    }
}

/// A symmetric key of 128 or 256 bits
///
/// Not `Clone`: a key lives in exactly one place and is wiped when that
/// place is dropped.
pub struct Key {
    bytes: SecretBuffer<AES256_KEY_SIZE>,
    size: KeySize,
}

impl Key {
    /// Copies a key out of `bytes`
    ///
    /// Fails with `InvalidKeyLength` unless `bytes` is 16 or 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let size = KeySize::from_len(bytes.len())?;
        let mut buffer = SecretBuffer::<AES256_KEY_SIZE>::zeroed();
        buffer.as_mut_slice()[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: buffer,
            size,
        })
    }

    /// Generates a random key from the operating system RNG
    pub fn generate(size: KeySize) -> Self {
        let mut buffer = SecretBuffer::<AES256_KEY_SIZE>::zeroed();
        OsRng.fill_bytes(&mut buffer.as_mut_slice()[..size.len()]);
        Self {
            bytes: buffer,
            size,
        }
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes.as_slice()[..self.size.len()]
    }

    /// Size of this key
    pub fn size(&self) -> KeySize {
        self.size
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.size.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Overwrites the key bytes where they live
    fn wipe(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({}-bit, [REDACTED])", self.size.bits())
    }
}

/// A key plus the metadata describing where it came from
///
/// The key stays inline for the material's whole life; revocation wipes it
/// in place rather than moving it out.
pub struct KeyMaterial {
    key: Key,
    revoked: bool,
    context: Vec<u8>,
    created_at: SystemTime,
}

impl KeyMaterial {
    /// Wraps an existing key with its derivation context
    pub fn new(key: Key, context: &[u8]) -> Self {
        Self {
            key,
            revoked: false,
            context: context.to_vec(),
            created_at: SystemTime::now(),
        }
    }

    /// Generates fresh random key material
    pub fn generate(size: KeySize) -> Self {
        Self::new(Key::generate(size), &[])
    }

    /// Copies raw key bytes into new key material
    pub fn from_slice(bytes: &[u8], context: &[u8]) -> Result<Self> {
        Ok(Self::new(Key::from_slice(bytes)?, context))
    }

    /// Borrows the key, failing with `UseAfterRevoke` once revoked
    pub fn key(&self) -> Result<&Key> {
        if self.revoked {
            warn!(context_len = self.context.len(), "access to revoked key material");
            return Err(Error::UseAfterRevoke {
                context: "KeyMaterial",
            });
        }
        Ok(&self.key)
    }

    /// Size of the held key
    pub fn key_size(&self) -> Result<KeySize> {
        Ok(self.key()?.size())
    }

    /// Runs `scope` with the key borrowed for its duration
    pub fn with_key<T, F>(&self, scope: F) -> Result<T>
    where
        F: FnOnce(&Key) -> Result<T>,
    {
        scope(self.key()?)
    }

    /// Derivation context recorded at creation
    pub fn context(&self) -> &[u8] {
        &self.context
    }

    /// Creation timestamp (advisory; not used for any expiry decision)
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Whether [`revoke`](Self::revoke) has been called
    pub fn is_revoked(&self) -> bool {
        self.revoked
    }

    /// Wipes the key now and refuses every later use
    ///
    /// Revoking twice is a no-op.
    pub fn revoke(&mut self) {
        if self.revoked {
            return;
        }
        self.key.wipe();
        self.revoked = true;
        debug!(key_bits = self.key.size().bits(), "revoked key material");
    }

    /// Derives child key material with HKDF-SHA-256
    ///
    /// The parent key is the input keying material, no salt is applied and
    /// `info` becomes the child's context.
    pub fn derive_subkey(&self, info: &[u8], size: KeySize) -> Result<KeyMaterial> {
        let parent = self.key()?;
        let okm = Hkdf::<Sha256>::derive(None, parent.as_bytes(), Some(info), size.len())?;
        debug!(key_bits = size.bits(), info_len = info.len(), "derived subkey");
        Ok(KeyMaterial::new(Key::from_slice(&okm)?, info))
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key", &self.key)
            .field("revoked", &self.revoked)
            .field("context_len", &self.context.len())
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Revokes `material`; equivalent to [`KeyMaterial::revoke`]
pub fn revoke(material: &mut KeyMaterial) {
    material.revoke();
}

/// Lends the key held in `raw` to `scope`, then wipes `raw`
///
/// `raw` is zeroed when this function returns, whether `scope` succeeds,
/// returns an error, or panics, and also when `raw` is not a valid key
/// length. The internal copy handed to `scope` is wiped the same way.
pub fn with_key<T, F>(raw: &mut [u8], scope: F) -> Result<T>
where
    F: FnOnce(&Key) -> Result<T>,
{
    let guard = ZeroizeGuard::new(raw);
    let key = Key::from_slice(&guard)?;
    scope(&key)
}

/// Random salt for callers that want one per derivation
pub fn generate_salt(len: usize) -> Zeroizing<Vec<u8>> {
    let mut salt = Zeroizing::new(vec![0u8; len]);
    OsRng.fill_bytes(&mut salt);
    salt
}
