// Keypair tests

use quorum_vault::identity::{Keypair, KeypairError};

#[test]
fn test_generated_keypairs_have_distinct_addresses() {
    let a = Keypair::generate();
    let b = Keypair::generate();

    assert_ne!(a.address(), b.address());
}

#[test]
fn test_restore_from_bytes_keeps_address() {
    let original = Keypair::generate();
    let restored = Keypair::from_bytes(&original.to_bytes()).unwrap();

    assert_eq!(original.address(), restored.address());
    assert_eq!(original.public_key_bytes(), restored.public_key_bytes());
}

#[test]
fn test_restore_from_hex_keeps_address() {
    let original = Keypair::generate();
    let encoded = format!("0x{}", hex::encode(original.to_bytes()));

    let restored = Keypair::from_hex(&encoded).unwrap();

    assert_eq!(original.address(), restored.address());
}

#[test]
fn test_wrong_length_fails() {
    let result = Keypair::from_bytes(&[1u8; 31]);

    assert!(matches!(
        result,
        Err(KeypairError::InvalidLength {
            expected: 32,
            got: 31
        })
    ));
}

#[test]
fn test_zero_secret_is_rejected() {
    let result = Keypair::from_bytes(&[0u8; 32]);
    assert!(matches!(result, Err(KeypairError::InvalidBytes(_))));
}
