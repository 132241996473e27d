mod aead_tests;
mod block_cipher_tests;
mod kdf_tests;
mod mac_tests;
