//! HMAC-based Extract-and-Expand Key Derivation Function (RFC 5869)

use core::marker::PhantomData;
use zeroize::Zeroizing;

use cryptolib_params::utils::hash::HKDF_MAX_BLOCKS;

use crate::error::{validate, Error, Result};
use crate::hash::HashFunction;
use crate::kdf::{KdfAlgorithm, KdfOperation, KeyDerivationFunction, ParamProvider};
use crate::mac::hmac::Hmac;

/// Type-level constants for HKDF
pub enum HkdfAlgorithm<H: HashFunction> {
    /// Phantom field for the hash function
    _Hash(PhantomData<H>),
}

impl<H: HashFunction> KdfAlgorithm for HkdfAlgorithm<H> {
    const DEFAULT_OUTPUT_SIZE: usize = 32;
    const ALGORITHM_ID: &'static str = "HKDF";

    fn name() -> String {
        format!("{}-{}", Self::ALGORITHM_ID, H::name())
    }
}

/// Default salt and info applied when a derivation call omits them
#[derive(Clone, Default)]
pub struct HkdfParams {
    /// Default salt
    pub salt: Option<Zeroizing<Vec<u8>>>,
    /// Default info (context label)
    pub info: Option<Zeroizing<Vec<u8>>>,
}

impl core::fmt::Debug for HkdfParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HkdfParams")
            .field("salt_len", &self.salt.as_ref().map(|s| s.len()))
            .field("info_len", &self.info.as_ref().map(|i| i.len()))
            .finish()
    }
}

/// HKDF over any [`HashFunction`]
#[derive(Clone)]
pub struct Hkdf<H: HashFunction> {
    _hash_type: PhantomData<H>,
    params: HkdfParams,
}

impl<H: HashFunction> Hkdf<H> {
    /// Largest output a single expand can produce: 255 hash blocks
    pub fn max_output_size() -> usize {
        HKDF_MAX_BLOCKS * H::output_size()
    }

    /// HKDF-Extract: PRK = HMAC(salt, IKM)
    ///
    /// An absent salt is treated as `HashLen` zero bytes, which HMAC's key
    /// padding makes equivalent to an empty key.
    pub fn extract(salt: Option<&[u8]>, ikm: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let result = Hmac::<H>::mac(salt.unwrap_or(&[]), ikm)?;
        Ok(Zeroizing::new(result))
    }

    /// HKDF-Expand: OKM = T(1) || T(2) || ... truncated to `length`
    ///
    /// Fails with `OutputTooLarge` before any HMAC work if `length` exceeds
    /// 255 hash blocks. The PRK must be at least one hash output long.
    pub fn expand(prk: &[u8], info: Option<&[u8]>, length: usize) -> Result<Zeroizing<Vec<u8>>> {
        let hash_len = H::output_size();
        validate::output_size("HKDF-Expand", length, Self::max_output_size())?;
        validate::min_length("HKDF PRK", prk.len(), hash_len)?;

        let info = info.unwrap_or(&[]);
        let mut okm = Zeroizing::new(Vec::with_capacity(length.div_ceil(hash_len) * hash_len));
        let mut previous = Zeroizing::new(Vec::new());

        for counter in 1..=length.div_ceil(hash_len) {
            let mut mac = Hmac::<H>::new(prk)?;
            mac.update(&previous)?.update(info)?.update(&[counter as u8])?;
            let block = Zeroizing::new(mac.finalize()?);
            previous.clear();
            previous.extend_from_slice(&block);
            okm.extend_from_slice(&block);
        }

        okm.truncate(length);
        Ok(okm)
    }

    /// Extract then expand
    pub fn derive(
        salt: Option<&[u8]>,
        ikm: &[u8],
        info: Option<&[u8]>,
        length: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        // size check first so an oversized request does no work at all
        validate::output_size("HKDF", length, Self::max_output_size())?;
        let prk = Self::extract(salt, ikm)?;
        Self::expand(&prk, info, length)
    }
}

impl<H: HashFunction> ParamProvider for Hkdf<H> {
    type Params = HkdfParams;

    fn with_params(params: Self::Params) -> Self {
        Hkdf {
            _hash_type: PhantomData,
            params,
        }
    }

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn set_params(&mut self, params: Self::Params) {
        self.params = params;
    }
}

impl<H: HashFunction> KeyDerivationFunction for Hkdf<H> {
    type Algorithm = HkdfAlgorithm<H>;

    fn new() -> Self {
        Self::with_params(HkdfParams::default())
    }

    fn derive_key(
        &self,
        input: &[u8],
        salt: Option<&[u8]>,
        info: Option<&[u8]>,
        length: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let salt = salt.or_else(|| self.params.salt.as_deref().map(Vec::as_slice));
        let info = info.or_else(|| self.params.info.as_deref().map(Vec::as_slice));
        Self::derive(salt, input, info, length)
    }

    fn builder(&self) -> impl KdfOperation<'_, Self::Algorithm> {
        HkdfOperation {
            kdf: self,
            ikm: None,
            salt: None,
            info: None,
            length: HkdfAlgorithm::<H>::DEFAULT_OUTPUT_SIZE,
        }
    }
}

/// Builder returned by [`Hkdf::builder`](KeyDerivationFunction::builder)
pub struct HkdfOperation<'a, H: HashFunction> {
    kdf: &'a Hkdf<H>,
    ikm: Option<&'a [u8]>,
    salt: Option<&'a [u8]>,
    info: Option<&'a [u8]>,
    length: usize,
}

impl<'a, H: HashFunction> KdfOperation<'a, HkdfAlgorithm<H>> for HkdfOperation<'a, H> {
    fn with_ikm(mut self, ikm: &'a [u8]) -> Self {
        self.ikm = Some(ikm);
        self
    }

    fn with_salt(mut self, salt: &'a [u8]) -> Self {
        self.salt = Some(salt);
        self
    }

    fn with_info(mut self, info: &'a [u8]) -> Self {
        self.info = Some(info);
        self
    }

    fn with_output_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    fn derive(self) -> Result<Zeroizing<Vec<u8>>> {
        let ikm = self
            .ikm
            .ok_or_else(|| Error::param("ikm", "input keying material is required"))?;
        self.kdf.derive_key(ikm, self.salt, self.info, self.length)
    }

    fn derive_array<const N: usize>(mut self) -> Result<[u8; N]> {
        self.length = N;
        let okm = self.derive()?;
        let mut out = [0u8; N];
        out.copy_from_slice(&okm);
        Ok(out)
    }
}
