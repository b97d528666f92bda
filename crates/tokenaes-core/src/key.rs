//! Key sizes and expanded round-key schedules.

use core::fmt;

use crate::block::{Block, BLOCK_SIZE};
use crate::error::{Error, Result};

/// Supported AES key lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeySize {
    /// 16-byte key, 10 rounds.
    Aes128,
    /// 24-byte key, 12 rounds.
    Aes192,
    /// 32-byte key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Every supported size, shortest first.
    pub const ALL: [KeySize; 3] = [KeySize::Aes128, KeySize::Aes192, KeySize::Aes256];

    /// Classifies a raw key by its length in bytes.
    pub fn from_key_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(KeySize::Aes128),
            24 => Ok(KeySize::Aes192),
            32 => Ok(KeySize::Aes256),
            other => Err(Error::InvalidKeyLength(other)),
        }
    }

    /// Maps a key size in bits (128, 192, 256) to a variant.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            128 => Some(KeySize::Aes128),
            192 => Some(KeySize::Aes192),
            256 => Some(KeySize::Aes256),
            _ => None,
        }
    }

    /// Key length in bytes.
    pub const fn key_bytes(self) -> usize {
        self.nk() * 4
    }

    /// Key length in bits.
    pub const fn bits(self) -> u32 {
        (self.key_bytes() * 8) as u32
    }

    /// Key length in 32-bit words (`Nk`).
    pub const fn nk(self) -> usize {
        match self {
            KeySize::Aes128 => 4,
            KeySize::Aes192 => 6,
            KeySize::Aes256 => 8,
        }
    }

    /// Number of rounds (`Nr = Nk + 6`).
    pub const fn rounds(self) -> usize {
        self.nk() + 6
    }

    /// Number of words in the expanded schedule, `4 * (Nr + 1)`.
    pub const fn schedule_words(self) -> usize {
        4 * (self.rounds() + 1)
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AES-{}", self.bits())
    }
}

/// Expanded round keys: `Nr + 1` blocks of four schedule words each.
///
/// Immutable once built, so a single schedule can be shared by reference
/// across threads.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRoundKeys"))]
pub struct RoundKeys {
    size: KeySize,
    keys: Vec<Block>,
}

impl RoundKeys {
    pub(crate) fn from_blocks(size: KeySize, keys: Vec<Block>) -> Result<Self> {
        let expected = size.rounds() + 1;
        if keys.len() != expected {
            return Err(Error::InvalidLength {
                context: "round key schedule (blocks)",
                expected,
                actual: keys.len(),
            });
        }
        Ok(Self { size, keys })
    }

    /// Key size this schedule was expanded from.
    #[inline]
    pub fn key_size(&self) -> KeySize {
        self.size
    }

    /// Number of cipher rounds (`Nr`).
    #[inline]
    pub fn rounds(&self) -> usize {
        self.size.rounds()
    }

    /// Returns the round key at `round`, or `None` past `Nr`.
    #[inline]
    pub fn get(&self, round: usize) -> Option<&Block> {
        self.keys.get(round)
    }

    // Round loops only ask for `0..=Nr`, which `from_blocks` guarantees.
    #[inline]
    pub(crate) fn round_key(&self, round: usize) -> &Block {
        &self.keys[round]
    }

    /// All round keys in order.
    pub fn as_blocks(&self) -> &[Block] {
        &self.keys
    }

    /// Schedule length in 32-bit words.
    pub fn len_words(&self) -> usize {
        self.keys.len() * (BLOCK_SIZE / 4)
    }

    /// Iterates the schedule as words `w[0], w[1], ...`, each in key byte order.
    pub fn words(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.keys
            .iter()
            .flat_map(|block| block.chunks_exact(4))
            .map(|chunk| [chunk[0], chunk[1], chunk[2], chunk[3]])
    }
}

// Round keys are key material; keep them out of logs.
impl fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundKeys")
            .field("size", &self.size)
            .field("rounds", &self.rounds())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRoundKeys {
    size: KeySize,
    keys: Vec<Block>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRoundKeys> for RoundKeys {
    type Error = Error;

    fn try_from(raw: RawRoundKeys) -> Result<Self> {
        RoundKeys::from_blocks(raw.size, raw.keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn key_size_parameters() {
        assert_eq!(KeySize::Aes128.nk(), 4);
        assert_eq!(KeySize::Aes192.rounds(), 12);
        assert_eq!(KeySize::Aes256.rounds(), 14);
        assert_eq!(KeySize::Aes128.schedule_words(), 44);
        assert_eq!(KeySize::Aes192.schedule_words(), 52);
        assert_eq!(KeySize::Aes256.schedule_words(), 60);
        assert_eq!(KeySize::Aes256.to_string(), "AES-256");
    }

    #[test]
    fn from_key_len_rejects_odd_sizes() {
        for size in KeySize::ALL {
            assert_eq!(KeySize::from_key_len(size.key_bytes()).unwrap(), size);
        }
        let err = KeySize::from_key_len(10).unwrap_err();
        assert_eq!(err, Error::InvalidKeyLength(10));
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn from_bits_round_trips() {
        for size in KeySize::ALL {
            assert_eq!(KeySize::from_bits(size.bits()), Some(size));
        }
        assert_eq!(KeySize::from_bits(16), None);
    }

    #[test]
    fn from_blocks_requires_matching_count() {
        let err = RoundKeys::from_blocks(KeySize::Aes128, vec![[0u8; 16]; 10]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(RoundKeys::from_blocks(KeySize::Aes128, vec![[0u8; 16]; 11]).is_ok());
    }

    #[test]
    fn get_past_last_round_is_none() {
        let keys: Vec<Block> = (0..15u8).map(|i| [i; 16]).collect();
        let rks = RoundKeys::from_blocks(KeySize::Aes256, keys).unwrap();
        assert_eq!(rks.get(14), Some(&[14u8; 16]));
        assert_eq!(rks.get(rks.rounds() + 1), None);
        assert_eq!(rks.get(usize::MAX), None);
    }

    #[test]
    fn debug_hides_key_material() {
        let rks = RoundKeys::from_blocks(KeySize::Aes128, vec![[0xab; 16]; 11]).unwrap();
        let rendered = format!("{rks:?}");
        assert!(rendered.contains("Aes128"));
        assert!(!rendered.contains("171"));
    }
}
