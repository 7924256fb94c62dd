// WalletStore - the wallet and its payout book kept in a sled tree
//
// Both records are postcard-encoded under fixed keys. Executing an action
// writes them together so the book never disagrees with the wallet.

use crate::execution::PayoutBook;
use crate::wallet::MultiSigWallet;
use std::path::Path;
use thiserror::Error;

mod keys {
    pub const WALLET: &[u8] = b"wallet:state";
    pub const PAYOUTS: &[u8] = b"payouts:book";
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Failed to encode {record}: {reason}")]
    Encode { record: &'static str, reason: String },

    #[error("Failed to decode {record}: {reason}")]
    Decode { record: &'static str, reason: String },
}

/// Persistent home of one wallet
pub struct WalletStore {
    db: sled::Db,
}

impl WalletStore {
    /// Open the store at `path`, creating it if needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }

    /// Block until every write has reached disk
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    pub(crate) fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.db.insert(key, value)?;
        Ok(())
    }

    pub(crate) fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.db.get(key)?.map(|v| v.to_vec()))
    }

    pub fn has_wallet(&self) -> Result<bool, StoreError> {
        Ok(self.db.contains_key(keys::WALLET)?)
    }

    pub fn save_wallet(&self, wallet: &MultiSigWallet) -> Result<(), StoreError> {
        self.put_raw(keys::WALLET, &encode_wallet(wallet)?)
    }

    /// Load the wallet, `None` if the store has never held one
    ///
    /// Stored state that breaks a wallet invariant (owner set, threshold,
    /// confirmation counts, treasury totals) fails with `Decode`.
    pub fn load_wallet(&self) -> Result<Option<MultiSigWallet>, StoreError> {
        self.get_raw(keys::WALLET)?
            .map(|bytes| {
                MultiSigWallet::from_bytes(&bytes).map_err(|e| StoreError::Decode {
                    record: "wallet",
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Load the payout book, empty if none was saved
    pub fn load_payouts(&self) -> Result<PayoutBook, StoreError> {
        match self.get_raw(keys::PAYOUTS)? {
            Some(bytes) => PayoutBook::from_bytes(&bytes).map_err(|e| StoreError::Decode {
                record: "payout book",
                reason: e.to_string(),
            }),
            None => Ok(PayoutBook::new()),
        }
    }

    /// Write wallet and payout book in one atomic batch
    pub fn save_all(&self, wallet: &MultiSigWallet, book: &PayoutBook) -> Result<(), StoreError> {
        let book_bytes = book.to_bytes().map_err(|e| StoreError::Encode {
            record: "payout book",
            reason: e.to_string(),
        })?;

        let mut batch = sled::Batch::default();
        batch.insert(keys::WALLET, encode_wallet(wallet)?);
        batch.insert(keys::PAYOUTS, book_bytes);
        self.db.apply_batch(batch)?;
        Ok(())
    }
}

fn encode_wallet(wallet: &MultiSigWallet) -> Result<Vec<u8>, StoreError> {
    wallet.to_bytes().map_err(|e| StoreError::Encode {
        record: "wallet",
        reason: e.to_string(),
    })
}
