//! Forward and inverse S-box tables.

use crate::gf::ginv;

const AFFINE_CONSTANT: u8 = 0x63;

const fn affine(b: u8) -> u8 {
    b ^ b.rotate_left(1) ^ b.rotate_left(2) ^ b.rotate_left(3) ^ b.rotate_left(4) ^ AFFINE_CONSTANT
}

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut forward = [0u8; 256];
    let mut inverse = [0u8; 256];
    let mut i = 0usize;
    while i < 256 {
        let s = affine(ginv(i as u8));
        forward[i] = s;
        inverse[s as usize] = i as u8;
        i += 1;
    }
    (forward, inverse)
}

const TABLES: ([u8; 256], [u8; 256]) = build_tables();

/// The AES S-box.
pub static SBOX: [u8; 256] = TABLES.0;

/// Inverse of [`SBOX`].
pub static INV_SBOX: [u8; 256] = TABLES.1;

/// Substitutes a byte through the S-box.
#[inline]
pub fn sbox(byte: u8) -> u8 {
    SBOX[byte as usize]
}

/// Substitutes a byte through the inverse S-box.
#[inline]
pub fn inv_sbox(byte: u8) -> u8 {
    INV_SBOX[byte as usize]
}
