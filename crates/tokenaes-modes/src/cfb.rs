//! Cipher feedback with full-block (128-bit) segments.
//!
//! Input of any length is accepted. A short final segment uses only the
//! leading keystream bytes, so no padding is involved.

use log::trace;
use tokenaes_core::{block_from_slice, encrypt_block, expand_key, RoundKeys, BLOCK_SIZE};

use crate::error::Result;

/// Which side of the feedback register the ciphertext comes from.
#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

fn cfb_apply(data: &[u8], round_keys: &RoundKeys, iv: &[u8], dir: Direction) -> Result<Vec<u8>> {
    let mut register = block_from_slice(iv, "CFB initialization vector")?;
    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks(BLOCK_SIZE) {
        let keystream = encrypt_block(&register, round_keys);
        let start = out.len();
        out.extend(chunk.iter().zip(&keystream).map(|(d, k)| d ^ k));
        if chunk.len() == BLOCK_SIZE {
            let feedback = match dir {
                Direction::Encrypt => &out[start..],
                Direction::Decrypt => chunk,
            };
            register = block_from_slice(feedback, "CFB feedback")?;
        }
    }
    Ok(out)
}

/// Encrypts `data` under an existing schedule.
pub fn cfb_encrypt(data: &[u8], round_keys: &RoundKeys, iv: &[u8]) -> Result<Vec<u8>> {
    trace!("cfb encrypt: {} bytes", data.len());
    cfb_apply(data, round_keys, iv, Direction::Encrypt)
}

/// Decrypts `data` under an existing schedule.
pub fn cfb_decrypt(data: &[u8], round_keys: &RoundKeys, iv: &[u8]) -> Result<Vec<u8>> {
    trace!("cfb decrypt: {} bytes", data.len());
    cfb_apply(data, round_keys, iv, Direction::Decrypt)
}

/// Expands `key` and CFB-encrypts `data`.
pub fn aes_cfb_encrypt(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    cfb_encrypt(data, &expand_key(key)?, iv)
}

/// Expands `key` and CFB-decrypts `data`.
pub fn aes_cfb_decrypt(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    cfb_decrypt(data, &expand_key(key)?, iv)
}
