//! Counter (CTR) mode
//!
//! Successive counter blocks are enciphered and XORed with the data. The
//! counter block layout is configurable: a big-endian counter of 1 to 8
//! bytes sits at the front, the back, or a custom offset, and the nonce
//! fills the bytes outside the counter field in order, never overlapping it.
//!
//! The counter wraps within its own width. Callers choosing a narrow
//! counter are responsible for keeping messages short enough.

use zeroize::Zeroizing;

use super::super::BlockCipher;
use crate::error::{validate, Error, Result};
use cryptolib_common::security::barrier;

/// Counter position within the counter block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPosition {
    /// Counter occupies the first `counter_size` bytes; the nonce follows
    Prefix,

    /// Counter occupies the last `counter_size` bytes; the nonce leads
    Postfix,

    /// Counter starts at the given byte offset; the nonce fills the bytes
    /// before it and continues after it
    Custom(usize),
}

/// Counter mode with buffered keystream
pub struct Ctr<B: BlockCipher> {
    cipher: B,
    counter_block: Zeroizing<Vec<u8>>,
    counter_position: usize,
    counter_size: usize,
    initial_counter: u64,
    keystream: Zeroizing<Vec<u8>>,
    keystream_pos: usize,
}

impl<B: BlockCipher> Ctr<B> {
    /// Creates a CTR instance with a 4-byte counter at the end of the block
    pub fn new(cipher: B, nonce: &[u8]) -> Result<Self> {
        Self::with_counter_params(cipher, nonce, CounterPosition::Postfix, 4)
    }

    /// Creates a CTR instance with a custom counter layout
    ///
    /// Fails with `InvalidParameter` if the counter does not fit in the
    /// block, and with `NonceLengthError` if the nonce does not fit next to
    /// the counter.
    pub fn with_counter_params(
        cipher: B,
        nonce: &[u8],
        counter_pos: CounterPosition,
        counter_size: usize,
    ) -> Result<Self> {
        let block_size = B::block_size();

        validate::parameter(
            counter_size > 0 && counter_size <= 8 && counter_size <= block_size,
            "counter_size",
            "counter size must be between 1 and 8 bytes and fit in a block",
        )?;

        let position = match counter_pos {
            CounterPosition::Prefix => 0,
            CounterPosition::Postfix => block_size - counter_size,
            CounterPosition::Custom(offset) => {
                validate::parameter(
                    offset + counter_size <= block_size,
                    "counter_position",
                    "counter does not fit at the requested offset",
                )?;
                offset
            }
        };

        let max_nonce = block_size - counter_size;
        if nonce.len() > max_nonce {
            return Err(Error::NonceLengthError {
                context: "CTR nonce",
                expected: max_nonce,
                actual: nonce.len(),
            });
        }

        let mut ctr = Self {
            cipher,
            counter_block: Zeroizing::new(vec![0u8; block_size]),
            counter_position: position,
            counter_size,
            initial_counter: 0,
            keystream: Zeroizing::new(Vec::new()),
            keystream_pos: 0,
        };
        ctr.load_nonce(nonce);
        Ok(ctr)
    }

    fn load_nonce(&mut self, nonce: &[u8]) {
        self.counter_block.iter_mut().for_each(|b| *b = 0);
        let field = self.counter_position..self.counter_position + self.counter_size;
        let slots = (0..self.counter_block.len()).filter(|i| !field.contains(i));
        for (i, &b) in slots.zip(nonce) {
            self.counter_block[i] = b;
        }
    }

    fn counter_mask(&self) -> u64 {
        u64::MAX >> (64 - 8 * self.counter_size as u32)
    }

    /// Current counter value
    pub fn counter(&self) -> u64 {
        let field = &self.counter_block[self.counter_position..][..self.counter_size];
        field.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
    }

    fn write_counter(&mut self, value: u64) {
        let value = value & self.counter_mask();
        let bytes = value.to_be_bytes();
        let field = &mut self.counter_block[self.counter_position..][..self.counter_size];
        field.copy_from_slice(&bytes[8 - self.counter_size..]);
    }

    fn generate_keystream(&mut self) -> Result<()> {
        barrier::compiler_fence_seq_cst();

        self.keystream = Zeroizing::new(self.counter_block.to_vec());
        self.cipher.encrypt_block(&mut self.keystream)?;
        self.keystream_pos = 0;

        let next = self.counter().wrapping_add(1);
        self.write_counter(next);

        barrier::compiler_fence_seq_cst();
        Ok(())
    }

    /// XORs `data` with the keystream in place (encrypts or decrypts)
    pub fn process(&mut self, data: &mut [u8]) -> Result<()> {
        barrier::compiler_fence_seq_cst();

        for byte in data.iter_mut() {
            if self.keystream_pos >= self.keystream.len() {
                self.generate_keystream()?;
            }
            *byte ^= self.keystream[self.keystream_pos];
            self.keystream_pos += 1;
        }

        barrier::compiler_fence_seq_cst();
        Ok(())
    }

    /// Encrypts a message, continuing from the current stream position
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut out = plaintext.to_vec();
        self.process(&mut out)?;
        Ok(out)
    }

    /// Decrypts a message; identical to [`encrypt`](Self::encrypt)
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt(ciphertext)
    }

    /// Writes raw keystream into `output`, starting at the next block boundary
    pub fn keystream(&mut self, output: &mut [u8]) -> Result<()> {
        output.iter_mut().for_each(|b| *b = 0);
        self.keystream_pos = self.keystream.len();
        self.process(output)
    }

    /// Positions the stream at block `block_offset`, counted from the
    /// counter value set at construction or by the last [`reset`](Self::reset)
    pub fn seek(&mut self, block_offset: u64) {
        let target = self.initial_counter.wrapping_add(block_offset);
        self.write_counter(target);
        self.keystream = Zeroizing::new(Vec::new());
        self.keystream_pos = 0;
    }

    /// Sets the counter for the next keystream block, discarding any
    /// buffered keystream
    ///
    /// Values wider than the counter field are truncated to its width.
    pub fn set_counter(&mut self, counter: u64) {
        self.write_counter(counter);
        self.keystream = Zeroizing::new(Vec::new());
        self.keystream_pos = 0;
    }

    /// Restarts the stream, optionally with a new nonce, at `counter`
    pub fn reset(&mut self, nonce: Option<&[u8]>, counter: u64) -> Result<()> {
        if let Some(nonce) = nonce {
            let max_nonce = B::block_size() - self.counter_size;
            if nonce.len() > max_nonce {
                return Err(Error::NonceLengthError {
                    context: "CTR nonce",
                    expected: max_nonce,
                    actual: nonce.len(),
                });
            }
            self.load_nonce(nonce);
        }

        self.initial_counter = counter & self.counter_mask();
        self.set_counter(counter);
        Ok(())
    }
}
