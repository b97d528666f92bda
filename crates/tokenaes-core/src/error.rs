//! Error types for the block cipher core.

use thiserror::Error;

/// Coarse classification shared by every error in the workspace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The cipher was configured with an unsupported parameter (key size).
    Config,
    /// An input had the wrong length or shape.
    Validation,
    /// A transport encoding could not be decoded.
    Decode,
}

/// Errors raised by key expansion and schedule handling.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Key length is not 16, 24 or 32 bytes.
    #[error("invalid key length: expected 16, 24 or 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// A length-checked input did not have the required size.
    #[error("invalid length for {context}: expected {expected}, got {actual}")]
    InvalidLength {
        /// What was being checked.
        context: &'static str,
        /// Required length in bytes (or blocks, per `context`).
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
}

impl Error {
    /// Returns the error class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidKeyLength(_) => ErrorKind::Config,
            Error::InvalidLength { .. } => ErrorKind::Validation,
        }
    }
}

/// Result alias for the core crate.
pub type Result<T> = std::result::Result<T, Error>;
