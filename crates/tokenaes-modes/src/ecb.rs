//! Electronic codebook mode: every block is processed independently.

use log::trace;
use tokenaes_core::{decrypt_block, encrypt_block, expand_key, Block, RoundKeys, BLOCK_SIZE};

use crate::error::{ensure_aligned, Result};

fn apply(data: &[u8], round_keys: &RoundKeys, f: fn(&Block, &RoundKeys) -> Block) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks_exact(BLOCK_SIZE) {
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);
        out.extend_from_slice(&f(&block, round_keys));
    }
    out
}

/// Encrypts block-aligned `data` with an existing schedule.
pub fn ecb_encrypt(data: &[u8], round_keys: &RoundKeys) -> Result<Vec<u8>> {
    ensure_aligned(data, "ECB plaintext")?;
    trace!("ecb encrypt: {} blocks", data.len() / BLOCK_SIZE);
    Ok(apply(data, round_keys, encrypt_block))
}

/// Decrypts block-aligned `data` with an existing schedule.
pub fn ecb_decrypt(data: &[u8], round_keys: &RoundKeys) -> Result<Vec<u8>> {
    ensure_aligned(data, "ECB ciphertext")?;
    trace!("ecb decrypt: {} blocks", data.len() / BLOCK_SIZE);
    Ok(apply(data, round_keys, decrypt_block))
}

/// Expands `key` and encrypts block-aligned `data`.
pub fn aes_ecb_encrypt(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    ecb_encrypt(data, &expand_key(key)?)
}

/// Expands `key` and decrypts block-aligned `data`.
pub fn aes_ecb_decrypt(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    ecb_decrypt(data, &expand_key(key)?)
}
