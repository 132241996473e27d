use cryptolib_algorithms::block::{Aes, Aes128, Aes256, BlockCipher};
use cryptolib_tests::suites::constant_time::{assert_constant_time, TestConfig, TimingTester};
use std::hint::black_box;

fn compare_plaintexts<B: BlockCipher>(name: &str, cipher: &B) {
    let config = TestConfig::for_block_cipher();
    let zeros = [0u8; 16];
    let ones = [0xFFu8; 16];

    TimingTester::warm_up(config.num_warmup, || {
        let mut block = zeros;
        let _ = cipher.encrypt_block(&mut block);
    });

    let tester = TimingTester::from_config(&config);
    let (t_zeros, t_ones) = tester.measure_pair(
        || {
            let mut block = black_box(zeros);
            let _ = cipher.encrypt_block(&mut block);
            black_box(block);
        },
        || {
            let mut block = black_box(ones);
            let _ = cipher.encrypt_block(&mut block);
            black_box(block);
        },
    );
    assert_constant_time(name, &config, &t_zeros, &t_ones);
}

#[test]
#[ignore = "timing-sensitive"]
fn test_aes128_encrypt_plaintext_independent() {
    let cipher = Aes128::from_slice(&[0x2Bu8; 16]).unwrap();
    compare_plaintexts("AES-128 encrypt", &cipher);
}

#[test]
#[ignore = "timing-sensitive"]
fn test_aes256_encrypt_plaintext_independent() {
    let cipher = Aes256::from_slice(&[0x60u8; 32]).unwrap();
    compare_plaintexts("AES-256 encrypt", &cipher);
}

#[test]
#[ignore = "timing-sensitive"]
fn test_aes_decrypt_key_independent() {
    let config = TestConfig::for_block_cipher();
    let low = Aes::init(&[0x00u8; 16]).unwrap();
    let high = Aes::init(&[0xFFu8; 16]).unwrap();

    let tester = TimingTester::from_config(&config);
    let (t_low, t_high) = tester.measure_pair(
        || {
            let mut block = [0x3Cu8; 16];
            let _ = low.decrypt_block(&mut block);
            black_box(block);
        },
        || {
            let mut block = [0x3Cu8; 16];
            let _ = high.decrypt_block(&mut block);
            black_box(block);
        },
    );
    assert_constant_time("AES-128 decrypt key", &config, &t_low, &t_high);
}
