//! AES key schedule and block encryption/decryption for 128/192/256-bit keys.

use log::debug;

use crate::block::Block;
use crate::error::Result;
use crate::key::{KeySize, RoundKeys};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;

/// Round constants; `RCON[i]` is used for schedule word `Nk * i`.
const RCON: [u8; 11] = [
    0x8d, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36,
];

fn rot_word(word: [u8; 4]) -> [u8; 4] {
    [word[1], word[2], word[3], word[0]]
}

fn sub_word(word: [u8; 4]) -> [u8; 4] {
    word.map(sbox)
}

/// Expands a 16, 24 or 32 byte key into `Nr + 1` round keys.
///
/// Fails with [`Error::InvalidKeyLength`](crate::Error::InvalidKeyLength) for
/// any other key length.
pub fn expand_key(key: &[u8]) -> Result<RoundKeys> {
    let size = KeySize::from_key_len(key.len())?;
    let nk = size.nk();
    let total = size.schedule_words();

    let mut w: Vec<[u8; 4]> = Vec::with_capacity(total);
    w.extend(key.chunks_exact(4).map(|c| [c[0], c[1], c[2], c[3]]));

    for i in nk..total {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp));
            temp[0] ^= RCON[i / nk];
        } else if nk == 8 && i % nk == 4 {
            temp = sub_word(temp);
        }
        let prev = w[i - nk];
        w.push(core::array::from_fn(|b| prev[b] ^ temp[b]));
    }

    let blocks = w
        .chunks_exact(4)
        .map(|words| {
            let mut block = [0u8; 16];
            for (dst, word) in block.chunks_exact_mut(4).zip(words) {
                dst.copy_from_slice(word);
            }
            block
        })
        .collect();

    debug!("expanded {size} key into {total} schedule words");
    RoundKeys::from_blocks(size, blocks)
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let rounds = round_keys.rounds();
    let mut state = *block;

    add_round_key(&mut state, round_keys.round_key(0));

    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_keys.round_key(round));
    }

    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.round_key(rounds));

    state
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let rounds = round_keys.rounds();
    let mut state = *block;

    add_round_key(&mut state, round_keys.round_key(rounds));
    for round in (1..rounds).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, round_keys.round_key(round));
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, round_keys.round_key(0));

    state
}

/// Expands `key` and encrypts one block.
pub fn aes_encrypt(block: &Block, key: &[u8]) -> Result<Block> {
    let round_keys = expand_key(key)?;
    Ok(encrypt_block(block, &round_keys))
}

/// Expands `key` and decrypts one block.
pub fn aes_decrypt(block: &Block, key: &[u8]) -> Result<Block> {
    let round_keys = expand_key(key)?;
    Ok(decrypt_block(block, &round_keys))
}
