//! SM2 public key encryption tests.

use hex_literal::hex;
use proptest::prelude::*;
use rand_core::OsRng;
use sm2::{
    pke::{Cipher, DecryptingKey, Mode},
    Error, SecretKey,
};

const PRIVATE_KEY: [u8; 32] =
    hex!("3945208f7b2144b13f36e38ac6d39f95889393692860b51a42fb81ef4df7c5b8");

const MSG: &[u8] = b"encryption standard";

fn decrypting_key() -> DecryptingKey {
    DecryptingKey::new(&SecretKey::from_slice(&PRIVATE_KEY).unwrap())
}

#[test]
fn round_trip_all_modes() {
    let decrypting_key = decrypting_key();
    let cipher = decrypting_key
        .encrypting_key()
        .encrypt(&mut OsRng, MSG)
        .unwrap();

    for mode in [Mode::Asn1, Mode::C1C3C2, Mode::C1C2C3, Mode::C1C2] {
        let bytes = cipher.to_bytes(mode).unwrap();
        let decrypted = decrypting_key.decrypt_slice(&bytes, mode).unwrap();
        assert_eq!(decrypted, MSG, "mode {mode:?}");
    }
}

#[test]
fn concatenated_modes_layout() {
    let decrypting_key = decrypting_key();
    let cipher = decrypting_key
        .encrypting_key()
        .encrypt(&mut OsRng, MSG)
        .unwrap();

    let c1c3c2 = cipher.to_bytes(Mode::C1C3C2).unwrap();
    let c1c2c3 = cipher.to_bytes(Mode::C1C2C3).unwrap();
    let c1c2 = cipher.to_bytes(Mode::C1C2).unwrap();

    assert_eq!(c1c3c2[0], 0x04);
    assert_eq!(c1c3c2.len(), 65 + 32 + MSG.len());
    assert_eq!(c1c2c3.len(), c1c3c2.len());
    assert_eq!(c1c2.len(), 65 + MSG.len());

    // Same components, different order.
    assert_eq!(c1c3c2[..65], c1c2c3[..65]);
    assert_eq!(c1c3c2[65..97], c1c2c3[65 + MSG.len()..]);
    assert_eq!(c1c3c2[97..], c1c2c3[65..65 + MSG.len()]);
    assert_eq!(c1c2[65..], c1c2c3[65..65 + MSG.len()]);
}

#[test]
fn tampered_cipher_fails_hash_check() {
    let decrypting_key = decrypting_key();
    let cipher = decrypting_key
        .encrypting_key()
        .encrypt(&mut OsRng, MSG)
        .unwrap();

    // Flip one bit inside the C2 segment of each MAC-carrying mode.
    let mut c1c3c2 = cipher.to_bytes(Mode::C1C3C2).unwrap();
    c1c3c2[65 + 32] ^= 0x01;
    assert_eq!(
        decrypting_key.decrypt_slice(&c1c3c2, Mode::C1C3C2),
        Err(Error::HashMismatch)
    );

    let mut c1c2c3 = cipher.to_bytes(Mode::C1C2C3).unwrap();
    c1c2c3[65] ^= 0x01;
    assert_eq!(
        decrypting_key.decrypt_slice(&c1c2c3, Mode::C1C2C3),
        Err(Error::HashMismatch)
    );
}

#[test]
fn tampered_c1c2_decrypts_to_different_plaintext() {
    let decrypting_key = decrypting_key();
    let cipher = decrypting_key
        .encrypting_key()
        .encrypt(&mut OsRng, MSG)
        .unwrap();

    let mut bytes = cipher.to_bytes(Mode::C1C2).unwrap();
    bytes[65] ^= 0x01;

    // No hash to catch the manipulation: decryption succeeds with a
    // plaintext that differs in exactly the flipped bit.
    let decrypted = decrypting_key.decrypt_slice(&bytes, Mode::C1C2).unwrap();
    assert_ne!(decrypted, MSG);
    assert_eq!(decrypted[0], MSG[0] ^ 0x01);
    assert_eq!(&decrypted[1..], &MSG[1..]);
}

#[test]
fn tampered_ephemeral_point_rejected() {
    let decrypting_key = decrypting_key();
    let cipher = decrypting_key
        .encrypting_key()
        .encrypt(&mut OsRng, MSG)
        .unwrap();

    let mut bytes = cipher.to_bytes(Mode::C1C3C2).unwrap();
    bytes[10] ^= 0x01;
    assert!(decrypting_key.decrypt_slice(&bytes, Mode::C1C3C2).is_err());
}

#[test]
fn asn1_mode_is_a_der_sequence() {
    let decrypting_key = decrypting_key();
    let cipher = decrypting_key
        .encrypting_key()
        .encrypt(&mut OsRng, MSG)
        .unwrap();

    let bytes = cipher.to_bytes(Mode::Asn1).unwrap();
    assert_eq!(bytes[0], 0x30);
    let reparsed = Cipher::from_slice(&bytes, Mode::Asn1).unwrap();
    assert_eq!(&reparsed, &cipher);
}

#[test]
fn c1c2_parse_drops_hash() {
    let decrypting_key = decrypting_key();
    let cipher = decrypting_key
        .encrypting_key()
        .encrypt(&mut OsRng, MSG)
        .unwrap();

    let bytes = cipher.to_bytes(Mode::C1C2).unwrap();
    let reparsed = Cipher::from_slice(&bytes, Mode::C1C2).unwrap();
    assert!(reparsed.c3().is_none());

    // A hashless cipher cannot be re-encoded in a MAC-carrying mode.
    assert_eq!(reparsed.to_bytes(Mode::C1C3C2), Err(Error::InvalidEncoding));
}

#[test]
fn wrong_key_fails() {
    let decrypting_key = decrypting_key();
    let cipher = decrypting_key
        .encrypting_key()
        .encrypt(&mut OsRng, MSG)
        .unwrap();

    let other = DecryptingKey::new(&SecretKey::random(&mut OsRng));
    let bytes = cipher.to_bytes(Mode::C1C3C2).unwrap();
    assert_eq!(
        other.decrypt_slice(&bytes, Mode::C1C3C2),
        Err(Error::HashMismatch)
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn encrypt_and_decrypt(msg in proptest::collection::vec(any::<u8>(), 1..256)) {
        let decrypting_key = decrypting_key();
        let cipher = decrypting_key.encrypting_key().encrypt(&mut OsRng, &msg).unwrap();
        for mode in [Mode::Asn1, Mode::C1C3C2, Mode::C1C2C3, Mode::C1C2] {
            let bytes = cipher.to_bytes(mode).unwrap();
            prop_assert_eq!(&decrypting_key.decrypt_slice(&bytes, mode).unwrap(), &msg);
        }
    }
}
