//! Password-based text codec used by pages that ship AES-CTR encrypted tokens.
//!
//! Payload layout (before base64): `nonce (8 bytes) || ciphertext`. The nonce
//! fills the high half of the counter block; the low half starts at zero.
//!
//! The working key is derived by zero-padding the password's UTF-8 bytes to
//! the key length, expanding that as an AES key, and encrypting its first 16
//! bytes with it. The resulting block is repeated to fill the key length.
//! This derivation exists only for compatibility with existing payloads; it is
//! not a secure KDF.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::Engine as _;
use log::debug;
use tokenaes_core::{block_from_slice, encrypt_block, expand_key, KeySize, RoundKeys, BLOCK_SIZE};

use crate::ctr::{ctr_apply, Counter};
use crate::error::{Error, Result};

/// Nonce length used by existing payloads.
pub const DEFAULT_NONCE_LEN: usize = 8;

// Standard alphabet, padding required, stray low bits in the last symbol ignored.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decodes standard base64 after dropping bytes outside the alphabet, so
/// wrapped tokens decode as if joined.
fn decode_payload(encoded: &str) -> Result<Vec<u8>> {
    let filtered: Vec<u8> = encoded
        .bytes()
        .filter(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
        .collect();
    Ok(LENIENT.decode(filtered)?)
}

/// Parameters for [`TextCodec`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextCodecConfig {
    /// Key size of the derived working key (AES-128 or AES-256).
    pub key_size: KeySize,
    /// Leading payload bytes that seed the counter.
    pub nonce_len: usize,
}

impl Default for TextCodecConfig {
    fn default() -> Self {
        Self {
            key_size: KeySize::Aes128,
            nonce_len: DEFAULT_NONCE_LEN,
        }
    }
}

impl TextCodecConfig {
    /// Default layout with the key size given in bits (128 or 256).
    pub fn with_key_bits(bits: u32) -> Result<Self> {
        Ok(Self {
            key_size: text_key_size(bits)?,
            ..Self::default()
        })
    }
}

fn text_key_size(bits: u32) -> Result<KeySize> {
    match KeySize::from_bits(bits) {
        Some(size @ (KeySize::Aes128 | KeySize::Aes256)) => Ok(size),
        _ => Err(Error::UnsupportedKeySize(bits)),
    }
}

/// Derives the working key for `password`.
pub fn derive_text_key(password: &str, key_size: KeySize) -> Result<Vec<u8>> {
    if key_size == KeySize::Aes192 {
        return Err(Error::UnsupportedKeySize(key_size.bits()));
    }
    let key_len = key_size.key_bytes();
    let password = password.as_bytes();
    let take = password.len().min(key_len);

    let mut seed = vec![0u8; key_len];
    seed[..take].copy_from_slice(&password[..take]);

    let first = block_from_slice(&seed[..BLOCK_SIZE], "text key seed")?;
    let derived = encrypt_block(&first, &expand_key(&seed)?);
    Ok(derived.repeat(key_len / BLOCK_SIZE))
}

/// A password-bound codec that derives its key once and can process many
/// payloads.
#[derive(Clone, Debug)]
pub struct TextCodec {
    config: TextCodecConfig,
    round_keys: RoundKeys,
}

impl TextCodec {
    /// Creates a codec with the default configuration (AES-128, 8-byte nonce).
    pub fn new(password: &str) -> Result<Self> {
        Self::with_config(password, TextCodecConfig::default())
    }

    /// Creates a codec with explicit configuration.
    pub fn with_config(password: &str, config: TextCodecConfig) -> Result<Self> {
        if config.nonce_len > BLOCK_SIZE {
            return Err(Error::NonceTooLong(config.nonce_len));
        }
        let key = derive_text_key(password, config.key_size)?;
        debug!("text codec ready: {}, {}-byte nonce", config.key_size, config.nonce_len);
        Ok(Self {
            config,
            round_keys: expand_key(&key)?,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TextCodecConfig {
        &self.config
    }

    /// Decodes a base64 payload and returns the plaintext bytes.
    pub fn decrypt(&self, encoded: &str) -> Result<Vec<u8>> {
        let payload = decode_payload(encoded)?;
        let nonce_len = self.config.nonce_len;
        if payload.len() < nonce_len {
            return Err(Error::TruncatedPayload {
                nonce_len,
                actual: payload.len(),
            });
        }
        let (nonce, ciphertext) = payload.split_at(nonce_len);
        let mut counter = Counter::new(nonce)?;
        Ok(ctr_apply(ciphertext, &self.round_keys, &mut counter))
    }

    /// Encrypts `plaintext` under `nonce` and returns the base64 payload.
    pub fn encrypt(&self, plaintext: &[u8], nonce: &[u8]) -> Result<String> {
        if nonce.len() != self.config.nonce_len {
            return Err(Error::NonceLength {
                expected: self.config.nonce_len,
                actual: nonce.len(),
            });
        }
        let mut counter = Counter::new(nonce)?;
        let mut payload = nonce.to_vec();
        payload.extend(ctr_apply(plaintext, &self.round_keys, &mut counter));
        Ok(STANDARD.encode(payload))
    }
}

/// Decodes `encoded` with a key derived from `password`.
///
/// `key_size_bits` must be 128 or 256.
pub fn aes_decrypt_text(encoded: &str, password: &str, key_size_bits: u32) -> Result<Vec<u8>> {
    TextCodec::with_config(password, TextCodecConfig::with_key_bits(key_size_bits)?)?
        .decrypt(encoded)
}

/// Produces a payload that [`aes_decrypt_text`] accepts.
pub fn aes_encrypt_text(
    plaintext: &[u8],
    password: &str,
    key_size_bits: u32,
    nonce: &[u8],
) -> Result<String> {
    TextCodec::with_config(password, TextCodecConfig::with_key_bits(key_size_bits)?)?
        .encrypt(plaintext, nonce)
}
