//! Property tests for the AEAD, KDF and block-mode laws

use cryptolib_algorithms::block::{Aes128, BlockCipher, Cbc};
use cryptolib_api::Error;
use cryptolib_symmetric::{kdf, open, seal};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 16),
        prop::collection::vec(any::<u8>(), 32),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_gcm_roundtrip(
        key in key_strategy(),
        nonce in prop::array::uniform12(any::<u8>()),
        aad in prop::collection::vec(any::<u8>(), 0..64),
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let sealed = seal(&key, &nonce, &aad, &plaintext).unwrap();
        prop_assert_eq!(sealed.len(), plaintext.len() + 16);
        prop_assert_eq!(open(&key, &nonce, &aad, &sealed).unwrap(), plaintext);
    }

    #[test]
    fn prop_gcm_bit_flip_rejected(
        key in key_strategy(),
        nonce in prop::array::uniform12(any::<u8>()),
        plaintext in prop::collection::vec(any::<u8>(), 0..128),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut sealed = seal(&key, &nonce, b"", &plaintext).unwrap();
        let i = index.index(sealed.len());
        sealed[i] ^= 1 << bit;
        prop_assert!(
            matches!(
                open(&key, &nonce, b"", &sealed),
                Err(Error::AuthenticationFailure { .. })
            ),
            "flip at byte {} was accepted",
            i
        );
    }

    #[test]
    fn prop_gcm_aad_bound(
        key in key_strategy(),
        nonce in prop::array::uniform12(any::<u8>()),
        aad in prop::collection::vec(any::<u8>(), 0..32),
        other in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        prop_assume!(aad != other);
        let sealed = seal(&key, &nonce, &aad, b"bound to aad").unwrap();
        prop_assert!(open(&key, &nonce, &other, &sealed).is_err());
    }

    #[test]
    fn prop_gcm_bad_nonce_length(
        key in key_strategy(),
        nonce in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        prop_assume!(nonce.len() != 12);
        let expected = Error::NonceLengthError {
            context: "AES-GCM",
            expected: 12,
            actual: nonce.len(),
        };
        prop_assert_eq!(seal(&key, &nonce, b"", b"m").unwrap_err(), expected);
    }

    #[test]
    fn prop_kdf_length_and_prefix(
        ikm in prop::collection::vec(any::<u8>(), 0..64),
        salt in prop::collection::vec(any::<u8>(), 0..32),
        short in 1usize..64,
        extra in 0usize..200,
    ) {
        let long = short + extra;
        let a = kdf::derive(&ikm, &salt, b"prop", short).unwrap();
        let b = kdf::derive(&ikm, &salt, b"prop", long).unwrap();
        prop_assert_eq!(a.len(), short);
        prop_assert_eq!(b.len(), long);
        prop_assert_eq!(&a[..], &b[..short]);
    }

    #[test]
    fn prop_cbc_roundtrip(
        key in prop::array::uniform16(any::<u8>()),
        iv in prop::array::uniform16(any::<u8>()),
        blocks in 0usize..8,
        fill in any::<u8>(),
    ) {
        let plaintext = vec![fill; blocks * 16];
        let cbc = Cbc::new(Aes128::from_slice(&key).unwrap(), &iv).unwrap();
        let ciphertext = cbc.encrypt(&plaintext).unwrap();
        prop_assert_eq!(ciphertext.len(), plaintext.len());
        prop_assert_eq!(cbc.decrypt(&ciphertext).unwrap(), plaintext);
    }
}
