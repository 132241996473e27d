//! Cross-crate flows: derive a key, use it for AEAD, then retire it

use cryptolib_api::Error;
use cryptolib_common::{SecretBuffer, ZeroizeGuard};
use cryptolib_internal::{ct_eq, ct_select};
use cryptolib_params::utils::symmetric::{GCM_NONCE_SIZE, GCM_TAG_SIZE};
use cryptolib_symmetric::kdf;
use cryptolib_symmetric::{
    open, revoke, seal, with_key, Aead, Aes128Gcm, Aes256Gcm, AesGcm, KeyDeriver, KeyMaterial,
    KeySize, NonceSequence, SymmetricCipher,
};

#[test]
fn test_constant_time_compare() {
    let a = [1u8, 2, 3, 4];
    let b = [1u8, 2, 3, 4];
    let c = [1u8, 2, 3, 5];

    assert!(ct_eq(a, b));
    assert!(!ct_eq(a, c));
    assert!(!ct_eq(&a[..], &a[..3]));
    assert!(ct_eq([0u8; 0], [0u8; 0]));
}

#[test]
fn test_constant_time_select() {
    assert_eq!(ct_select(true, 1u32, 2u32), 1);
    assert_eq!(ct_select(false, 1u32, 2u32), 2);
}

#[test]
fn test_zeroize_guard_wipes_buffer() {
    let mut data = [7u8; 8];
    {
        let guard = ZeroizeGuard::new(&mut data[..]);
        assert_eq!(guard[0], 7);
    }
    assert_eq!(data, [0u8; 8]);

    let buffer = SecretBuffer::<16>::zeroed();
    assert_eq!(buffer.as_slice(), &[0u8; 16]);
}

#[test]
fn test_derive_then_seal_and_open() {
    let deriver = KeyDeriver::new();
    let material = deriver
        .derive_key(b"shared secret", Some(b"salt"), Some(b"session 1"), KeySize::Aes256)
        .unwrap();
    assert_eq!(material.context(), b"session 1");

    let cipher = Aes256Gcm::new(&material).unwrap();
    let mut nonces = NonceSequence::new([0, 0, 0, 7]);

    let messages: [&[u8]; 3] = [b"", b"short", &[0xAB; 1000]];
    for msg in messages {
        let nonce = nonces.next().unwrap();
        let sealed = cipher.encrypt(&nonce, msg, Some(b"hdr")).unwrap();
        assert_eq!(sealed.len(), msg.len() + GCM_TAG_SIZE);
        assert_eq!(cipher.decrypt(&nonce, &sealed, Some(b"hdr")).unwrap(), msg);
    }
    assert_eq!(nonces.counter(), 3);
}

#[test]
fn test_both_parties_derive_same_key() {
    let alice = KeyDeriver::new()
        .derive_key(b"agreed", None, Some(b"link"), KeySize::Aes128)
        .unwrap();
    let bob = KeyDeriver::new()
        .derive_key(b"agreed", None, Some(b"link"), KeySize::Aes128)
        .unwrap();

    let nonce = Aes128Gcm::generate_nonce();
    let sealed = Aes128Gcm::new(&alice)
        .unwrap()
        .seal(&nonce, b"", b"ping")
        .unwrap();
    assert_eq!(
        Aes128Gcm::new(&bob).unwrap().open(&nonce, b"", &sealed).unwrap(),
        b"ping"
    );
}

#[test]
fn test_raw_and_material_paths_agree() {
    let okm = kdf::derive(b"ikm", b"salt", b"info", 32).unwrap();
    let nonce = [3u8; GCM_NONCE_SIZE];
    let sealed = seal(&okm, &nonce, b"aad", b"payload").unwrap();

    let material = KeyMaterial::from_slice(&okm, b"info").unwrap();
    let cipher = AesGcm::new(&material).unwrap();
    let nonce = cryptolib_symmetric::GcmNonce::new(nonce);
    assert_eq!(cipher.seal(&nonce, b"aad", b"payload").unwrap(), sealed);
    assert_eq!(open(&okm, nonce.as_bytes(), b"aad", &sealed).unwrap(), b"payload");
}

#[test]
fn test_revoked_material_cannot_be_used() {
    let mut material = KeyMaterial::generate(KeySize::Aes256);
    revoke(&mut material);

    let expected = Error::UseAfterRevoke {
        context: "KeyMaterial",
    };
    assert_eq!(Aes256Gcm::new(&material).unwrap_err(), expected);
    assert_eq!(material.derive_subkey(b"x", KeySize::Aes128).unwrap_err(), expected);
    assert_eq!(material.with_key(|_| Ok(())).unwrap_err(), expected);
}

#[test]
fn test_with_key_wipes_raw_bytes() {
    let mut raw = kdf::derive(b"ikm", b"", b"wrap", 16).unwrap().to_vec();
    let nonce = [0u8; GCM_NONCE_SIZE];

    let sealed = with_key(&mut raw, |key| {
        AesGcm::from_key(key)?.seal(&cryptolib_symmetric::GcmNonce::new(nonce), b"", b"data")
    })
    .unwrap();
    assert_eq!(sealed.len(), 4 + GCM_TAG_SIZE);
    assert!(raw.iter().all(|&b| b == 0));

    let mut bad = vec![9u8; 20];
    let err = with_key(&mut bad, |_| Ok(())).unwrap_err();
    assert!(matches!(err, Error::InvalidKeyLength { actual: 20, .. }));
    assert!(bad.iter().all(|&b| b == 0));
}

#[test]
fn test_errors_do_not_leak_secrets() {
    let key = [0x5Cu8; 32];
    let nonce = [0x6Du8; GCM_NONCE_SIZE];
    let mut sealed = seal(&key, &nonce, b"", b"TOPSECRETPLAINTEXT").unwrap();
    sealed[0] ^= 1;

    let err = open(&key, &nonce, b"", &sealed).unwrap_err();
    let shown = format!("{} {:?}", err, err);
    assert!(!shown.contains("TOPSECRET"));
    assert!(!shown.contains(&hex::encode(key)));
    assert!(!shown.contains(&hex::encode(nonce)));
    assert!(!shown.contains(&hex::encode(&sealed[sealed.len() - GCM_TAG_SIZE..])));

    let material = KeyMaterial::from_slice(&key, b"ctx").unwrap();
    assert!(!format!("{:?}", material).contains("5c5c"));
}

#[test]
fn test_oversized_derivation_rejected() {
    let max = KeyDeriver::max_output_size();
    assert_eq!(max, 255 * 32);
    assert_eq!(
        kdf::derive(b"ikm", b"", b"", max + 1).unwrap_err(),
        Error::OutputTooLarge {
            context: "HKDF",
            max,
            requested: max + 1
        }
    );
    assert_eq!(kdf::derive(b"ikm", b"", b"", max).unwrap().len(), max);
}
