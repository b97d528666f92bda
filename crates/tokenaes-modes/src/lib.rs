//! Block chaining modes and the password text codec built on `tokenaes-core`.
//!
//! Every operation here is a pure function of its inputs: schedules are
//! expanded per call (or passed in by reference), nothing is cached, and no
//! I/O happens. A [`RoundKeys`] value can be shared across threads for
//! ECB, CTR keystream generation, or CBC and CFB decryption.
//!
//! The text codec's key derivation is kept only for compatibility with
//! existing payloads and is not a secure KDF.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cbc;
mod cfb;
mod ctr;
mod ecb;
mod error;
mod padding;
mod text;

pub use crate::cbc::{
    aes_cbc_decrypt, aes_cbc_decrypt_padded, aes_cbc_encrypt, aes_cbc_encrypt_padded, cbc_decrypt,
    cbc_encrypt, sequence_iv,
};
pub use crate::cfb::{aes_cfb_decrypt, aes_cfb_encrypt, cfb_decrypt, cfb_encrypt};
pub use crate::ctr::{aes_ctr_decrypt, aes_ctr_encrypt, ctr_apply, Counter};
pub use crate::ecb::{aes_ecb_decrypt, aes_ecb_encrypt, ecb_decrypt, ecb_encrypt};
pub use crate::error::{Error, Result};
pub use crate::padding::{pkcs7_pad, pkcs7_unpad};
pub use crate::text::{
    aes_decrypt_text, aes_encrypt_text, derive_text_key, TextCodec, TextCodecConfig,
    DEFAULT_NONCE_LEN,
};

pub use tokenaes_core::{
    aes_decrypt, aes_encrypt, decrypt_block, encrypt_block, expand_key, Block, ErrorKind, KeySize,
    RoundKeys, BLOCK_SIZE,
};
