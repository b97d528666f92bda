//! Block representation helpers.

use crate::error::{Error, Result};

/// Size of an AES block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes, column-major when viewed as the 4×4 state.
pub type Block = [u8; BLOCK_SIZE];

/// XORs `rhs` into `dst` byte by byte.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Copies a slice into a block, failing unless it is exactly 16 bytes long.
pub fn block_from_slice(bytes: &[u8], context: &'static str) -> Result<Block> {
    bytes.try_into().map_err(|_| Error::InvalidLength {
        context,
        expected: BLOCK_SIZE,
        actual: bytes.len(),
    })
}
