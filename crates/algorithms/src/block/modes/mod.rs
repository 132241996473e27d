//! Block cipher modes of operation (NIST SP 800-38A)
//!
//! All modes are generic over [`BlockCipher`](super::BlockCipher) and require
//! an IV exactly one block long. ECB and CBC work on whole blocks only; CFB,
//! OFB and CTR turn the cipher into a stream and accept any length.
//!
//! None of these modes authenticate. Use [`Gcm`](crate::aead::Gcm) when
//! integrity matters.

pub mod cbc;
pub mod cfb;
pub mod ctr;
pub mod ecb;
pub mod ofb;

pub use cbc::Cbc;
pub use cfb::Cfb;
pub use ctr::{CounterPosition, Ctr};
pub use ecb::Ecb;
pub use ofb::Ofb;

/// XOR `src` into the prefix of `dst`
#[inline(always)]
pub(crate) fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= s;
    }
}
