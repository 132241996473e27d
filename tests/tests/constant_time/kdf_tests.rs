use cryptolib_algorithms::hash::Sha256;
use cryptolib_algorithms::kdf::Hkdf;
use cryptolib_tests::suites::constant_time::{assert_constant_time, TestConfig, TimingTester};
use std::hint::black_box;

#[test]
#[ignore = "timing-sensitive"]
fn test_hkdf_secret_independent() {
    let config = TestConfig::for_hkdf();
    let low = [0x00u8; 32];
    let high = [0xFFu8; 32];
    let salt = b"salt";
    let info = b"context";

    TimingTester::warm_up(config.num_warmup, || {
        let _ = Hkdf::<Sha256>::derive(Some(salt), &low, Some(info), 64);
    });

    let tester = TimingTester::from_config(&config);
    let (t_low, t_high) = tester.measure_pair(
        || {
            black_box(Hkdf::<Sha256>::derive(Some(salt), black_box(&low), Some(info), 64).ok());
        },
        || {
            black_box(Hkdf::<Sha256>::derive(Some(salt), black_box(&high), Some(info), 64).ok());
        },
    );
    assert_constant_time("HKDF-SHA256 derive", &config, &t_low, &t_high);
}
