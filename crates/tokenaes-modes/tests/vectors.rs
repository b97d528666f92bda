//! Known-answer vectors for the public entry points.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokenaes_modes::{
    aes_cbc_decrypt, aes_cbc_encrypt, aes_cbc_encrypt_padded, aes_cfb_decrypt, aes_cfb_encrypt,
    aes_decrypt_text, aes_encrypt_text, expand_key, pkcs7_pad, ErrorKind,
};

const SECRET_MSG: &[u8] = b"Secret message goes here";

const CBC_CIPHERTEXT: &[u8] =
    b"\x97\x92+\xe5\x0b\xc3\x18\x91ky9m&\xb3\xb5@\xe6'\xc2\x96.\xc8u\x88\xab9-[\x9e|\xf1\xcd";

fn key_and_iv() -> [u8; 16] {
    let mut key = [0u8; 16];
    key[0] = 0x20;
    key[1] = 0x15;
    key
}

fn password() -> String {
    String::from_utf8(key_and_iv().to_vec()).expect("key bytes are ASCII")
}

#[test]
fn cbc_encrypt_matches_reference_ciphertext() {
    let key = key_and_iv();
    let ct = aes_cbc_encrypt(&pkcs7_pad(SECRET_MSG), &key, &key).unwrap();
    assert_eq!(ct, CBC_CIPHERTEXT);
    assert_eq!(
        hex::encode(&ct),
        "97922be50bc318916b79396d26b3b540e627c2962ec87588ab392d5b9e7cf1cd"
    );
    assert_eq!(aes_cbc_encrypt_padded(SECRET_MSG, &key, &key).unwrap(), ct);
}

#[test]
fn cbc_decrypt_then_strip_pad_bytes() {
    let key = key_and_iv();
    let plain = aes_cbc_decrypt(CBC_CIPHERTEXT, &key, &key).unwrap();
    let stripped: &[u8] = {
        let end = plain.iter().rposition(|&b| b != 0x08).map_or(0, |i| i + 1);
        &plain[..end]
    };
    assert_eq!(stripped, SECRET_MSG);
}

#[test]
fn decrypt_text_128() {
    let iv = key_and_iv();
    let mut payload = iv[..8].to_vec();
    payload.extend_from_slice(b"\x17\x15\x93\xab\x8d\x80V\xcdV\xe0\t\xcdo\xc2\xa5\xd8ksM\r\xe27N\xae");
    let encoded = STANDARD.encode(&payload);
    assert_eq!(encoded, "IBUAAAAAAAAXFZOrjYBWzVbgCc1vwqXYa3NNDeI3Tq4=");

    let decrypted = aes_decrypt_text(&encoded, &password(), 128).unwrap();
    assert_eq!(decrypted, SECRET_MSG);
}

#[test]
fn decrypt_text_256() {
    let iv = key_and_iv();
    let mut payload = iv[..8].to_vec();
    payload.extend_from_slice(b"\x0b\xe6\xa4\xd9z\x0e\xb8\xb9\xd0\xd4i_\x85\x1d\x99\x98_\xe5\x80\xe7.\xbf\xa5\x83");
    let encoded = STANDARD.encode(&payload);
    assert_eq!(encoded, "IBUAAAAAAAAL5qTZeg64udDUaV+FHZmYX+WA5y6/pYM=");

    let decrypted = aes_decrypt_text(&encoded, &password(), 256).unwrap();
    assert_eq!(decrypted, SECRET_MSG);
}

#[test]
fn encrypt_text_reproduces_reference_payload() {
    let iv = key_and_iv();
    let encoded = aes_encrypt_text(SECRET_MSG, &password(), 128, &iv[..8]).unwrap();
    assert_eq!(encoded, "IBUAAAAAAAAXFZOrjYBWzVbgCc1vwqXYa3NNDeI3Tq4=");
}

#[test]
fn decrypt_text_accepts_wrapped_and_loose_tail_payloads() {
    for encoded in [
        "IBUAAAAAAAAXFZOrjYBWzVbg\nCc1vwqXYa3NNDeI3Tq4=",
        "IBUAAAAAAAAXFZOrjYBWzVbgCc1vwqXYa3NNDeI3Tq5=",
    ] {
        assert_eq!(aes_decrypt_text(encoded, &password(), 128).unwrap(), SECRET_MSG);
    }
}

#[test]
fn cfb_matches_nist_cfb128_vector() {
    let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
    let iv = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
    let plain = hex::decode("6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51").unwrap();
    let ct = aes_cfb_encrypt(&plain, &key, &iv).unwrap();
    assert_eq!(
        hex::encode(&ct),
        "3b3fd92eb72dad20333449f8e83cfb4ac8a64537a0b3a93fcde3cdad9f1ce58b"
    );
    assert_eq!(aes_cfb_decrypt(&ct, &key, &iv).unwrap(), plain);
}

#[test]
fn ten_byte_key_is_a_config_error() {
    let err = expand_key(&[0u8; 10]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);

    let err = aes_cbc_encrypt(&[0u8; 16], &[0u8; 10], &[0u8; 16]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}
