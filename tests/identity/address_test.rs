// Address parsing and derivation tests

use quorum_vault::identity::{Address, AddressError, Keypair};

#[test]
fn test_parse_with_and_without_prefix() {
    let with: Address = "0x00000000000000000000000000000000000000ff".parse().unwrap();
    let without: Address = "00000000000000000000000000000000000000ff".parse().unwrap();

    assert_eq!(with, without);
    assert_eq!(with.as_bytes()[19], 0xff);
}

#[test]
fn test_parse_wrong_length_fails() {
    let result: Result<Address, _> = "0x1234".parse();

    assert_eq!(
        result,
        Err(AddressError::InvalidLength {
            expected: 20,
            got: 2
        })
    );
}

#[test]
fn test_parse_bad_hex_fails() {
    let result: Result<Address, _> = "0xzz00000000000000000000000000000000000000".parse();
    assert!(matches!(result, Err(AddressError::InvalidHex(_))));
}

#[test]
fn test_display_is_lowercase_hex() {
    let addr = Address::from_bytes([0xAB; 20]);
    assert_eq!(addr.to_string(), format!("0x{}", "ab".repeat(20)));
}

#[test]
fn test_wallet_address_depends_on_owners_and_salt() {
    let a = Keypair::generate().address();
    let b = Keypair::generate().address();

    let first = Address::for_wallet(&[a, b], 0);

    assert_eq!(first, Address::for_wallet(&[a, b], 0));
    assert_ne!(first, Address::for_wallet(&[a, b], 1));
    assert_ne!(first, Address::for_wallet(&[b, a], 0));
    assert!(!first.is_zero());
}
