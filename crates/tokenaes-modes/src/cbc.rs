//! Cipher block chaining.

use log::trace;
use tokenaes_core::{
    block_from_slice, decrypt_block, encrypt_block, expand_key, xor_in_place, Block, RoundKeys,
    BLOCK_SIZE,
};

use crate::error::{ensure_aligned, Result};
use crate::padding::{pkcs7_pad, pkcs7_unpad};

/// Encrypts block-aligned `data` under an existing schedule.
///
/// Callers pad beforehand (see [`aes_cbc_encrypt_padded`]).
pub fn cbc_encrypt(data: &[u8], round_keys: &RoundKeys, iv: &[u8]) -> Result<Vec<u8>> {
    let mut chain = block_from_slice(iv, "CBC initialization vector")?;
    ensure_aligned(data, "CBC plaintext")?;
    trace!("cbc encrypt: {} blocks", data.len() / BLOCK_SIZE);

    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks_exact(BLOCK_SIZE) {
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);
        xor_in_place(&mut block, &chain);
        chain = encrypt_block(&block, round_keys);
        out.extend_from_slice(&chain);
    }
    Ok(out)
}

/// Decrypts block-aligned `data` under an existing schedule.
///
/// Each plaintext block depends only on two ciphertext blocks, never on
/// earlier decryption output.
pub fn cbc_decrypt(data: &[u8], round_keys: &RoundKeys, iv: &[u8]) -> Result<Vec<u8>> {
    let iv = block_from_slice(iv, "CBC initialization vector")?;
    ensure_aligned(data, "CBC ciphertext")?;
    trace!("cbc decrypt: {} blocks", data.len() / BLOCK_SIZE);

    let mut out = Vec::with_capacity(data.len());
    let mut previous: &[u8] = &iv;
    for chunk in data.chunks_exact(BLOCK_SIZE) {
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);
        let mut plain = decrypt_block(&block, round_keys);
        for (p, c) in plain.iter_mut().zip(previous) {
            *p ^= *c;
        }
        out.extend_from_slice(&plain);
        previous = chunk;
    }
    Ok(out)
}

/// Expands `key` and CBC-encrypts block-aligned `data`.
pub fn aes_cbc_encrypt(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    cbc_encrypt(data, &expand_key(key)?, iv)
}

/// Expands `key` and CBC-decrypts block-aligned `data`.
pub fn aes_cbc_decrypt(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    cbc_decrypt(data, &expand_key(key)?, iv)
}

/// PKCS#7-pads `data`, then CBC-encrypts it.
pub fn aes_cbc_encrypt_padded(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    aes_cbc_encrypt(&pkcs7_pad(data), key, iv)
}

/// CBC-decrypts `data`, then strips and checks its PKCS#7 trailer.
pub fn aes_cbc_decrypt_padded(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let mut plain = aes_cbc_decrypt(data, key, iv)?;
    let body_len = pkcs7_unpad(&plain)?.len();
    plain.truncate(body_len);
    Ok(plain)
}

/// IV for an HLS segment whose playlist gives no explicit IV: the media
/// sequence number as a big-endian 128-bit integer.
pub fn sequence_iv(media_sequence: u64) -> Block {
    let mut iv = [0u8; BLOCK_SIZE];
    iv[8..].copy_from_slice(&media_sequence.to_be_bytes());
    iv
}
