//! AES round transformations on the column-major 4×4 state.

use crate::block::{xor_in_place, Block};
use crate::gf::gmul;
use crate::sbox::{inv_sbox, sbox};

const MIX: [[u8; 4]; 4] = [
    [0x02, 0x03, 0x01, 0x01],
    [0x01, 0x02, 0x03, 0x01],
    [0x01, 0x01, 0x02, 0x03],
    [0x03, 0x01, 0x01, 0x02],
];

const INV_MIX: [[u8; 4]; 4] = [
    [0x0e, 0x0b, 0x0d, 0x09],
    [0x09, 0x0e, 0x0b, 0x0d],
    [0x0d, 0x09, 0x0e, 0x0b],
    [0x0b, 0x0d, 0x09, 0x0e],
];

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

/// Rotates row `r` of the state left by `r` positions.
#[inline]
pub fn shift_rows(state: &mut Block) {
    let old = *state;
    for col in 0..4 {
        for row in 1..4 {
            state[col * 4 + row] = old[((col + row) % 4) * 4 + row];
        }
    }
}

/// Rotates row `r` of the state right by `r` positions.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    let old = *state;
    for col in 0..4 {
        for row in 1..4 {
            state[((col + row) % 4) * 4 + row] = old[col * 4 + row];
        }
    }
}

fn mix_with(state: &mut Block, matrix: &[[u8; 4]; 4]) {
    for column in state.chunks_exact_mut(4) {
        let input = [column[0], column[1], column[2], column[3]];
        for (out, coefficients) in column.iter_mut().zip(matrix.iter()) {
            *out = coefficients
                .iter()
                .zip(input.iter())
                .fold(0, |acc, (&c, &b)| acc ^ gmul(c, b));
        }
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    mix_with(state, &MIX);
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    mix_with(state, &INV_MIX);
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_block() -> Block {
        core::array::from_fn(|i| i as u8)
    }

    #[test]
    fn shift_rows_moves_bytes_per_row() {
        let mut state = counting_block();
        shift_rows(&mut state);
        assert_eq!(
            state,
            [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11]
        );
        inv_shift_rows(&mut state);
        assert_eq!(state, counting_block());
    }

    #[test]
    fn mix_columns_known_column() {
        // Standard test column: db 13 53 45 -> 8e 4d a1 bc.
        let mut state = [0u8; 16];
        state[..4].copy_from_slice(&[0xdb, 0x13, 0x53, 0x45]);
        state[4..8].copy_from_slice(&[0xf2, 0x0a, 0x22, 0x5c]);
        mix_columns(&mut state);
        assert_eq!(&state[..4], &[0x8e, 0x4d, 0xa1, 0xbc]);
        assert_eq!(&state[4..8], &[0x9f, 0xdc, 0x58, 0x9d]);
    }

    #[test]
    fn inverse_transforms_undo_forward_ones() {
        let original = counting_block();

        let mut state = original;
        mix_columns(&mut state);
        inv_mix_columns(&mut state);
        assert_eq!(state, original);

        let mut state = original;
        sub_bytes(&mut state);
        inv_sub_bytes(&mut state);
        assert_eq!(state, original);
    }
}
