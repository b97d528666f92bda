//! AES block cipher core used to recover obfuscated page tokens.
//!
//! This crate follows FIPS-197 directly and provides:
//! - GF(2^8) arithmetic and compile-time S-box tables.
//! - Key schedules for 128, 192 and 256-bit keys.
//! - Single-block encryption and decryption.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
pub mod gf;
mod key;
mod round;
mod sbox;

pub use crate::block::{block_from_slice, xor_in_place, Block, BLOCK_SIZE};
pub use crate::cipher::{aes_decrypt, aes_encrypt, decrypt_block, encrypt_block, expand_key};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::key::{KeySize, RoundKeys};
pub use crate::sbox::{inv_sbox, sbox, INV_SBOX, SBOX};
