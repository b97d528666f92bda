//! PKCS#7 padding to the AES block size.

use tokenaes_core::BLOCK_SIZE;

use crate::error::{Error, Result};

/// Appends 1..=16 bytes, each equal to the number of bytes appended.
///
/// Block-aligned input gains a full block of `0x10`.
pub fn pkcs7_pad(data: &[u8]) -> Vec<u8> {
    let pad = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut out = Vec::with_capacity(data.len() + pad);
    out.extend_from_slice(data);
    out.resize(data.len() + pad, pad as u8);
    out
}

/// Strips a PKCS#7 trailer, checking every pad byte.
pub fn pkcs7_unpad(data: &[u8]) -> Result<&[u8]> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidPadding);
    }
    let pad = usize::from(data[data.len() - 1]);
    if pad == 0 || pad > BLOCK_SIZE {
        return Err(Error::InvalidPadding);
    }
    let (body, trailer) = data.split_at(data.len() - pad);
    if trailer.iter().any(|&b| usize::from(b) != pad) {
        return Err(Error::InvalidPadding);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenaes_core::ErrorKind;

    #[test]
    fn pads_partial_block() {
        let padded = pkcs7_pad(b"Secret message goes here");
        assert_eq!(padded.len(), 32);
        assert_eq!(&padded[24..], &[0x08; 8]);
        assert_eq!(pkcs7_unpad(&padded).unwrap(), b"Secret message goes here");
    }

    #[test]
    fn aligned_input_gains_a_full_block() {
        let padded = pkcs7_pad(&[0xaa; 16]);
        assert_eq!(padded.len(), 32);
        assert_eq!(&padded[16..], &[0x10; 16]);
        assert_eq!(pkcs7_pad(&[]), vec![0x10; 16]);
        assert_eq!(pkcs7_unpad(&padded).unwrap(), &[0xaa; 16]);
    }

    #[test]
    fn rejects_malformed_trailers() {
        let mut zero = [0x41u8; 16];
        zero[15] = 0;
        assert!(matches!(pkcs7_unpad(&zero), Err(Error::InvalidPadding)));

        let mut too_big = [0x41u8; 16];
        too_big[15] = 17;
        assert!(pkcs7_unpad(&too_big).is_err());

        let mut inconsistent = [0x41u8; 16];
        inconsistent[14] = 3;
        inconsistent[15] = 3;
        let err = pkcs7_unpad(&inconsistent).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert!(pkcs7_unpad(&[]).is_err());
        assert!(pkcs7_unpad(&[1u8; 15]).is_err());
    }
}
