// Effect implementation tests

use quorum_vault::execution::{Effect, EffectError, MockEffect, PayoutBook};
use quorum_vault::identity::{Address, Keypair};
use quorum_vault::MultiSigWallet;

fn funded_wallet(owners: &[Address], balance: u64) -> MultiSigWallet {
    let mut wallet =
        MultiSigWallet::new(Keypair::generate().address(), owners.to_vec(), 1).unwrap();
    wallet.deposit(owners[0], balance).unwrap();
    wallet
}

#[test]
fn test_mock_defaults_to_failure() {
    let owner = Keypair::generate().address();
    let mut wallet = funded_wallet(&[owner], 100);
    let id = wallet.submit(owner, owner, 10, vec![]).unwrap();
    wallet.confirm(owner, id).unwrap();
    let mut effect = MockEffect::default();

    let result = wallet.execute(owner, id, &mut effect);

    assert!(result.is_err());
    assert_eq!(effect.call_count(), 1);
}

#[test]
fn test_payout_book_credits_recipient() {
    let owner = Keypair::generate().address();
    let recipient = Keypair::generate().address();
    let mut wallet = funded_wallet(&[owner], 1000);
    let mut book = PayoutBook::new();

    for value in [100, 250] {
        let id = wallet.submit(owner, recipient, value, vec![0xaa]).unwrap();
        wallet.confirm(owner, id).unwrap();
        wallet.execute(owner, id, &mut book).unwrap();
    }

    assert_eq!(book.credited(&recipient), 350);
    assert_eq!(book.credited(&owner), 0);
    assert_eq!(book.receipts().len(), 2);
    assert_eq!(book.receipts()[1].transfer().value(), 250);
    assert!(book.receipts()[0].paid_at() <= book.receipts()[1].paid_at());
    assert_eq!(wallet.balance(), 650);
}

#[test]
fn test_payout_book_rejects_overflow() {
    let owner = Keypair::generate().address();
    let recipient = Keypair::generate().address();
    let mut wallet = funded_wallet(&[owner], u64::MAX);
    let mut book = PayoutBook::new();

    let first = wallet.submit(owner, recipient, u64::MAX - 1, vec![]).unwrap();
    wallet.confirm(owner, first).unwrap();
    wallet.execute(owner, first, &mut book).unwrap();

    let second = wallet.submit(owner, recipient, 1, vec![]).unwrap();
    wallet.confirm(owner, second).unwrap();
    wallet.execute(owner, second, &mut book).unwrap();

    let third = wallet.submit(owner, recipient, 0, vec![]).unwrap();
    wallet.confirm(owner, third).unwrap();
    wallet.execute(owner, third, &mut book).unwrap();

    wallet.deposit(owner, 1).unwrap();
    let fourth = wallet.submit(owner, recipient, 1, vec![]).unwrap();
    wallet.confirm(owner, fourth).unwrap();
    let result = wallet.execute(owner, fourth, &mut book);

    assert!(matches!(
        result,
        Err(quorum_vault::MultiSigError::EffectFailed(EffectError::Rejected(_)))
    ));
    assert_eq!(book.credited(&recipient), u64::MAX);
    assert_eq!(book.receipts().len(), 3);
    assert_eq!(wallet.balance(), 1);
}

#[test]
fn test_payout_book_bytes_roundtrip() {
    let owner = Keypair::generate().address();
    let mut wallet = funded_wallet(&[owner], 10);
    let mut book = PayoutBook::new();
    let id = wallet.submit(owner, owner, 10, vec![1, 2, 3]).unwrap();
    wallet.confirm(owner, id).unwrap();
    wallet.execute(owner, id, &mut book).unwrap();

    let restored = PayoutBook::from_bytes(&book.to_bytes().unwrap()).unwrap();

    assert_eq!(restored, book);
}

#[test]
fn test_effect_usable_as_trait_object() {
    let owner = Keypair::generate().address();
    let mut wallet = funded_wallet(&[owner], 10);
    let id = wallet.submit(owner, owner, 10, vec![]).unwrap();
    wallet.confirm(owner, id).unwrap();
    let mut mock = MockEffect::new().with_success();
    let effect: &mut dyn Effect = &mut mock;

    wallet.execute(owner, id, effect).unwrap();

    assert_eq!(mock.call_count(), 1);
}
