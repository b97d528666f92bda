//! Errors raised by the chaining modes and the text codec.

use thiserror::Error;
use tokenaes_core::ErrorKind;

/// Mode-level error.
#[derive(Debug, Error)]
pub enum Error {
    /// Key expansion or a core length check failed.
    #[error(transparent)]
    Core(#[from] tokenaes_core::Error),

    /// Input for a block mode is not a whole number of blocks.
    #[error("{context} length {actual} is not a multiple of the 16-byte block size")]
    Unaligned {
        /// What was being processed.
        context: &'static str,
        /// Length that was supplied.
        actual: usize,
    },

    /// CTR nonce longer than one block.
    #[error("nonce of {0} bytes does not fit in a 16-byte counter block")]
    NonceTooLong(usize),

    /// Text nonce does not match the codec's configured length.
    #[error("text nonce is {actual} bytes, expected {expected}")]
    NonceLength {
        /// Configured nonce length.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// PKCS#7 trailer is missing or malformed.
    #[error("invalid PKCS#7 padding")]
    InvalidPadding,

    /// Text payload is too short to hold its nonce.
    #[error("text payload of {actual} bytes is shorter than its {nonce_len}-byte nonce")]
    TruncatedPayload {
        /// Nonce length the codec expects.
        nonce_len: usize,
        /// Decoded payload length.
        actual: usize,
    },

    /// Text codec asked for a key size it does not support.
    #[error("unsupported text key size: {0} bits (expected 128 or 256)")]
    UnsupportedKeySize(u32),

    /// The payload was not valid base64.
    #[error("malformed base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl Error {
    /// Returns the error class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Core(inner) => inner.kind(),
            Error::UnsupportedKeySize(_) => ErrorKind::Config,
            Error::Unaligned { .. }
            | Error::NonceTooLong(_)
            | Error::NonceLength { .. }
            | Error::InvalidPadding
            | Error::TruncatedPayload { .. } => ErrorKind::Validation,
            Error::Decode(_) => ErrorKind::Decode,
        }
    }
}

/// Result alias for the modes crate.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn ensure_aligned(data: &[u8], context: &'static str) -> Result<()> {
    if data.len() % tokenaes_core::BLOCK_SIZE != 0 {
        return Err(Error::Unaligned {
            context,
            actual: data.len(),
        });
    }
    Ok(())
}
