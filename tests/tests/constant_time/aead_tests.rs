use cryptolib_algorithms::aead::Gcm;
use cryptolib_algorithms::block::{Aes128, BlockCipher};
use cryptolib_tests::suites::constant_time::{assert_constant_time, TestConfig, TimingTester};
use std::hint::black_box;

const NONCE: [u8; 12] = [0x42; 12];
const AAD: &[u8] = b"additional data";

fn make_gcm() -> (Gcm<Aes128>, Vec<u8>) {
    let cipher = Aes128::from_slice(&[0x07u8; 16]).unwrap();
    let gcm = Gcm::new(cipher).unwrap();
    let sealed = gcm.seal(&NONCE, AAD, &[0x33u8; 64]).unwrap();
    (gcm, sealed)
}

#[test]
#[ignore = "timing-sensitive"]
fn test_gcm_tag_mismatch_position() {
    let config = TestConfig::for_aead();
    let (gcm, sealed) = make_gcm();
    let tag_start = sealed.len() - 16;

    let mut first = sealed.clone();
    first[tag_start] ^= 1;
    let mut last = sealed.clone();
    last[sealed.len() - 1] ^= 1;

    TimingTester::warm_up(config.num_warmup, || {
        let _ = gcm.open(&NONCE, AAD, &first);
    });

    let tester = TimingTester::from_config(&config);
    let (t_first, t_last) = tester.measure_pair(
        || {
            black_box(gcm.open(&NONCE, AAD, black_box(&first)).is_err());
        },
        || {
            black_box(gcm.open(&NONCE, AAD, black_box(&last)).is_err());
        },
    );
    assert_constant_time("GCM tag mismatch first vs last byte", &config, &t_first, &t_last);
}

#[test]
#[ignore = "timing-sensitive"]
fn test_gcm_forged_vs_forged_ciphertext() {
    let config = TestConfig::for_aead();
    let (gcm, sealed) = make_gcm();

    let mut early = sealed.clone();
    early[0] ^= 0x80;
    let mut late = sealed.clone();
    late[63] ^= 0x80;

    let tester = TimingTester::from_config(&config);
    let (t_early, t_late) = tester.measure_pair(
        || {
            black_box(gcm.open(&NONCE, AAD, black_box(&early)).is_err());
        },
        || {
            black_box(gcm.open(&NONCE, AAD, black_box(&late)).is_err());
        },
    );
    assert_constant_time("GCM ciphertext tamper position", &config, &t_early, &t_late);
}
