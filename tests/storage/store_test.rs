// Store Tests
// Tests for the sled-backed wallet store

use quorum_vault::execution::{MockEffect, PayoutBook};
use quorum_vault::identity::{Address, Keypair};
use quorum_vault::storage::WalletStore;
use quorum_vault::MultiSigWallet;
use tempfile::TempDir;

fn sample_wallet() -> (MultiSigWallet, Vec<Address>) {
    let owners: Vec<Address> = (0..3).map(|_| Keypair::generate().address()).collect();
    let mut wallet = MultiSigWallet::new(Keypair::generate().address(), owners.clone(), 2).unwrap();
    wallet.deposit(owners[0], 1000).unwrap();
    let id = wallet.submit(owners[0], owners[2], 250, vec![0xde, 0xad]).unwrap();
    wallet.confirm(owners[0], id).unwrap();
    (wallet, owners)
}

// ============================================================================
// STORE CREATION AND BASIC OPERATIONS
// ============================================================================

#[test]
fn test_store_open_new() {
    let temp_dir = TempDir::new().unwrap();
    let store = WalletStore::open(temp_dir.path()).unwrap();

    assert!(!store.has_wallet().unwrap());
    assert!(store.load_wallet().unwrap().is_none());
}

// ============================================================================
// WALLET PERSISTENCE
// ============================================================================

#[test]
fn test_save_and_load_wallet() {
    let temp_dir = TempDir::new().unwrap();
    let store = WalletStore::open(temp_dir.path()).unwrap();
    let (wallet, _) = sample_wallet();

    store.save_wallet(&wallet).unwrap();

    assert!(store.has_wallet().unwrap());
    assert_eq!(store.load_wallet().unwrap(), Some(wallet));
}

#[test]
fn test_wallet_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let (wallet, owners) = sample_wallet();

    {
        let store = WalletStore::open(temp_dir.path()).unwrap();
        store.save_wallet(&wallet).unwrap();
        store.flush().unwrap();
    }

    let store = WalletStore::open(temp_dir.path()).unwrap();
    let mut loaded = store.load_wallet().unwrap().unwrap();

    assert_eq!(loaded.owners(), owners.as_slice());
    assert_eq!(loaded.action_count(), 1);
    assert!(loaded.is_confirmed(0, &owners[0]));

    // The restored wallet keeps working
    loaded.confirm(owners[1], 0).unwrap();
    loaded
        .execute(owners[1], 0, &mut MockEffect::new().with_success())
        .unwrap();
    assert_eq!(loaded.balance(), 750);
}

// ============================================================================
// TAMPERED STATE
// ============================================================================

fn tampered(wallet: &MultiSigWallet, from: &str, to: &str) -> String {
    let yaml = serde_yaml::to_string(wallet).unwrap();
    assert!(yaml.contains(from), "{from} not in {yaml}");
    yaml.replacen(from, to, 1)
}

#[test]
fn test_untouched_state_reloads() {
    let (wallet, _) = sample_wallet();
    let yaml = serde_yaml::to_string(&wallet).unwrap();

    let loaded: MultiSigWallet = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(loaded, wallet);
}

#[test]
fn test_zero_threshold_is_rejected() {
    let (wallet, _) = sample_wallet();
    let yaml = tampered(&wallet, "threshold: 2", "threshold: 0");

    assert!(serde_yaml::from_str::<MultiSigWallet>(&yaml).is_err());
}

#[test]
fn test_threshold_above_owner_count_is_rejected() {
    let (wallet, _) = sample_wallet();
    let yaml = tampered(&wallet, "threshold: 2", "threshold: 4");

    assert!(serde_yaml::from_str::<MultiSigWallet>(&yaml).is_err());
}

#[test]
fn test_duplicate_owner_is_rejected() {
    let (wallet, owners) = sample_wallet();
    let yaml = tampered(&wallet, &owners[1].to_string(), &owners[0].to_string());

    assert!(serde_yaml::from_str::<MultiSigWallet>(&yaml).is_err());
}

#[test]
fn test_confirmation_count_drift_is_rejected() {
    let (wallet, _) = sample_wallet();
    let yaml = tampered(&wallet, "confirmations: 1", "confirmations: 2");

    assert!(serde_yaml::from_str::<MultiSigWallet>(&yaml).is_err());
}

#[test]
fn test_inflated_balance_is_rejected() {
    let (wallet, _) = sample_wallet();
    let yaml = tampered(&wallet, "balance: 1000", "balance: 5000");

    assert!(serde_yaml::from_str::<MultiSigWallet>(&yaml).is_err());
}

// ============================================================================
// PAYOUT PERSISTENCE
// ============================================================================

#[test]
fn test_missing_payouts_load_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = WalletStore::open(temp_dir.path()).unwrap();

    assert_eq!(store.load_payouts().unwrap(), PayoutBook::new());
}

#[test]
fn test_save_all_persists_both() {
    let temp_dir = TempDir::new().unwrap();
    let store = WalletStore::open(temp_dir.path()).unwrap();
    let (mut wallet, owners) = sample_wallet();
    let mut book = PayoutBook::new();
    wallet.confirm(owners[1], 0).unwrap();
    wallet.execute(owners[0], 0, &mut book).unwrap();

    store.save_all(&wallet, &book).unwrap();

    assert_eq!(store.load_wallet().unwrap(), Some(wallet));
    let loaded = store.load_payouts().unwrap();
    assert_eq!(loaded.credited(&owners[2]), 250);
    assert_eq!(loaded, book);
}
