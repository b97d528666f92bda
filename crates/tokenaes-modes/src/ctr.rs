//! Counter mode.
//!
//! The keystream for block `n` is `E(counter + n)`, where the counter is a
//! 128-bit big-endian integer that wraps on overflow. Encryption and
//! decryption are the same operation, and a trailing partial block uses only
//! as many keystream bytes as it needs.

use log::trace;
use tokenaes_core::{encrypt_block, expand_key, Block, RoundKeys, BLOCK_SIZE};

use crate::error::{Error, Result};

/// A 16-byte big-endian block counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Counter(Block);

impl Counter {
    /// Seeds a counter from `nonce`, zero-filling the bytes it does not cover.
    pub fn new(nonce: &[u8]) -> Result<Self> {
        if nonce.len() > BLOCK_SIZE {
            return Err(Error::NonceTooLong(nonce.len()));
        }
        let mut block = [0u8; BLOCK_SIZE];
        block[..nonce.len()].copy_from_slice(nonce);
        Ok(Self(block))
    }

    /// Wraps an explicit counter block.
    pub fn from_block(block: Block) -> Self {
        Self(block)
    }

    /// Current counter value.
    pub fn value(&self) -> &Block {
        &self.0
    }

    /// Returns the counter `blocks` steps ahead, wrapping modulo 2^128.
    pub fn offset(&self, blocks: u128) -> Self {
        Self(u128::from_be_bytes(self.0).wrapping_add(blocks).to_be_bytes())
    }

    /// Adds one, wrapping modulo 2^128.
    pub fn increment(&mut self) {
        *self = self.offset(1);
    }

    /// Returns the current value and advances the counter.
    pub fn next_block(&mut self) -> Block {
        let current = self.0;
        self.increment();
        current
    }
}

/// XORs `data` with the keystream starting at `counter`, advancing it by one
/// per block consumed (including a partial final block).
pub fn ctr_apply(data: &[u8], round_keys: &RoundKeys, counter: &mut Counter) -> Vec<u8> {
    trace!(
        "ctr apply: {} bytes from counter {:02x?}",
        data.len(),
        counter.value()
    );
    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks(BLOCK_SIZE) {
        let keystream = encrypt_block(&counter.next_block(), round_keys);
        out.extend(chunk.iter().zip(keystream.iter()).map(|(d, k)| d ^ k));
    }
    out
}

/// Expands `key` and CTR-encrypts `data` from a counter seeded by `nonce`.
pub fn aes_ctr_encrypt(data: &[u8], key: &[u8], nonce: &[u8]) -> Result<Vec<u8>> {
    let round_keys = expand_key(key)?;
    let mut counter = Counter::new(nonce)?;
    Ok(ctr_apply(data, &round_keys, &mut counter))
}

/// Expands `key` and CTR-decrypts `data`; identical to [`aes_ctr_encrypt`].
pub fn aes_ctr_decrypt(data: &[u8], key: &[u8], nonce: &[u8]) -> Result<Vec<u8>> {
    aes_ctr_encrypt(data, key, nonce)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenaes_core::ErrorKind;

    #[test]
    fn counter_is_zero_padded_on_the_right() {
        let counter = Counter::new(&[0xaa; 8]).unwrap();
        let mut expected = [0u8; 16];
        expected[..8].copy_from_slice(&[0xaa; 8]);
        assert_eq!(counter.value(), &expected);
    }

    #[test]
    fn counter_carries_and_wraps() {
        let mut counter = Counter::from_block([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff]);
        counter.increment();
        assert_eq!(counter.value()[14..], [1, 0]);

        let mut top = Counter::from_block([0xff; 16]);
        assert_eq!(top.next_block(), [0xff; 16]);
        assert_eq!(top.value(), &[0u8; 16]);
        assert_eq!(Counter::from_block([0xff; 16]).offset(2).value()[15], 1);
    }

    #[test]
    fn keystream_matches_encrypted_counter_across_wrap() {
        // Keystream from the all-ones counter, then the wrapped zero counter.
        let key = [0u8; 16];
        let ks = aes_ctr_encrypt(&[0u8; 32], &key, &[0xff; 16]).unwrap();
        assert_eq!(
            hex::encode(ks),
            "3f5b8cc9ea855a0afa7347d23e8d664e66e94bd4ef8a2c3b884cfa59ca342b2e"
        );
    }

    #[test]
    fn partial_final_block_and_self_inverse() {
        let key = [0x24u8; 24];
        let nonce = [1u8; 12];
        let msg = b"twenty-one byte input";
        let ct = aes_ctr_encrypt(msg, &key, &nonce).unwrap();
        assert_eq!(ct.len(), msg.len());
        assert_ne!(&ct[..], &msg[..]);
        assert_eq!(aes_ctr_decrypt(&ct, &key, &nonce).unwrap(), msg);
    }

    #[test]
    fn split_processing_matches_one_pass() {
        let rks = expand_key(&[7u8; 32]).unwrap();
        let data: Vec<u8> = (0..80u8).collect();
        let start = Counter::new(&[9u8; 8]).unwrap();

        let mut single = start;
        let whole = ctr_apply(&data, &rks, &mut single);
        assert_eq!(single, start.offset(5));

        let mut second = start.offset(2);
        let mut first = start;
        let mut pieces = ctr_apply(&data[..32], &rks, &mut first);
        pieces.extend(ctr_apply(&data[32..], &rks, &mut second));
        assert_eq!(pieces, whole);
        assert_eq!(first, start.offset(2));
    }

    #[test]
    fn rejects_oversized_nonce() {
        let err = aes_ctr_encrypt(b"x", &[0u8; 16], &[0u8; 17]).unwrap_err();
        assert!(matches!(err, Error::NonceTooLong(17)));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
