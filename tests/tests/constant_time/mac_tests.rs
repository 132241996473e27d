use cryptolib_algorithms::hash::Sha256;
use cryptolib_algorithms::mac::Hmac;
use cryptolib_tests::suites::constant_time::{assert_constant_time, TestConfig, TimingTester};
use std::hint::black_box;

#[test]
#[ignore = "timing-sensitive"]
fn test_hmac_sha256_data_independent() {
    let config = TestConfig::for_mac();
    let key = [0x0bu8; 32];
    let zeros = [0u8; 64];
    let ones = [0xFFu8; 64];

    TimingTester::warm_up(config.num_warmup, || {
        let _ = Hmac::<Sha256>::mac(&key, &zeros);
    });

    let tester = TimingTester::from_config(&config);
    let (t_zeros, t_ones) = tester.measure_pair(
        || {
            black_box(Hmac::<Sha256>::mac(&key, black_box(&zeros)).ok());
        },
        || {
            black_box(Hmac::<Sha256>::mac(&key, black_box(&ones)).ok());
        },
    );
    assert_constant_time("HMAC-SHA256 mac", &config, &t_zeros, &t_ones);
}

#[test]
#[ignore = "timing-sensitive"]
fn test_hmac_verify_mismatch_position() {
    let config = TestConfig::for_mac();
    let key = [0x0bu8; 32];
    let data = b"message to authenticate";
    let tag = Hmac::<Sha256>::mac(&key, data).unwrap();

    let mut first = tag.clone();
    first[0] ^= 1;
    let mut last = tag.clone();
    last[31] ^= 1;

    let tester = TimingTester::from_config(&config);
    let (t_first, t_last) = tester.measure_pair(
        || {
            black_box(Hmac::<Sha256>::verify(&key, data, black_box(&first)).is_err());
        },
        || {
            black_box(Hmac::<Sha256>::verify(&key, data, black_box(&last)).is_err());
        },
    );
    assert_constant_time("HMAC-SHA256 verify", &config, &t_first, &t_last);
}
